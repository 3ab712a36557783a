//! Hover tooltips registered through the navbar's decoration pass.

use ratatui::{
    Frame,
    layout::Rect,
    text::Span,
    widgets::{Clear, Paragraph},
};
use storefront_core::{Decorate, TooltipTarget, TooltipTrigger};

use super::text_width;
use crate::theme;

/// Registry of decorated elements plus the one currently hovered.
#[derive(Debug, Default)]
pub struct HoverTooltips {
    targets: Vec<TooltipTarget>,
    active: Option<usize>,
}

impl Decorate for HoverTooltips {
    fn decorate(&mut self, targets: &[TooltipTarget]) {
        for target in targets {
            match self.targets.iter_mut().find(|t| t.id == target.id) {
                Some(existing) => *existing = target.clone(),
                None => self.targets.push(target.clone()),
            }
        }
    }
}

impl HoverTooltips {
    /// Pointer now over element `id` (or over nothing). Returns whether the
    /// visible tooltip changed.
    pub fn hover(&mut self, id: Option<&str>) -> bool {
        let next = id.and_then(|id| {
            self.targets
                .iter()
                .position(|t| t.id == id && t.trigger == TooltipTrigger::Hover)
        });
        let changed = next != self.active;
        self.active = next;
        changed
    }

    /// The tooltip to show, if any.
    pub fn active(&self) -> Option<&TooltipTarget> {
        self.active.and_then(|i| self.targets.get(i))
    }

    /// Forget everything; the next mount decorates afresh.
    pub fn clear(&mut self) {
        self.targets.clear();
        self.active = None;
    }

    /// Draw the active tooltip just below `anchor`, kept inside `bounds`.
    pub fn render(&self, frame: &mut Frame, anchor: Rect, bounds: Rect) {
        let Some(target) = self.active() else {
            return;
        };
        let width = (text_width(&target.text) + 2).min(bounds.width);
        let y = anchor.bottom();
        if width == 0 || y >= bounds.bottom() {
            return;
        }
        let x = anchor.x.min(bounds.right().saturating_sub(width));
        let area = Rect::new(x, y, width, 1);

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {} ", target.text), theme::tooltip())),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn logout() -> TooltipTarget {
        TooltipTarget {
            id: "logout",
            text: "Logout".into(),
            trigger: TooltipTrigger::Hover,
        }
    }

    #[test]
    fn hover_over_registered_element_activates() {
        let mut tips = HoverTooltips::default();
        tips.decorate(&[logout()]);

        assert!(tips.hover(Some("logout")));
        assert_eq!(tips.active(), Some(&logout()));

        assert!(!tips.hover(Some("logout")));
        assert!(tips.hover(None));
        assert_eq!(tips.active(), None);
    }

    #[test]
    fn unregistered_element_shows_nothing() {
        let mut tips = HoverTooltips::default();
        assert!(!tips.hover(Some("logout")));
        assert_eq!(tips.active(), None);
    }

    #[test]
    fn redecorating_does_not_duplicate() {
        let mut tips = HoverTooltips::default();
        tips.decorate(&[logout()]);
        tips.decorate(&[logout()]);
        assert_eq!(tips.targets.len(), 1);

        tips.clear();
        assert!(!tips.hover(Some("logout")));
    }
}
