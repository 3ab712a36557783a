//! Reusable rendering pieces shared by the screens.

pub mod navbar;
pub mod tooltip;

use ratatui::layout::Rect;

/// Width of `text` in cells, saturating.
pub fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// A `width` x `height` rect centered in `area`, clamped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_clamps_to_area() {
        let area = Rect::new(10, 5, 20, 4);
        assert_eq!(centered(area, 10, 2), Rect::new(15, 6, 10, 2));
        assert_eq!(centered(area, 50, 50), area);
    }
}
