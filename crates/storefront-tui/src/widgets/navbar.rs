//! Renders a [`NavBar`]: title left, slot content center, logout right.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use storefront_core::NavBar;
use storefront_core::view::navbar::LOGOUT_TEXT;

use super::text_width;
use crate::theme;

/// Rows the bar occupies, borders included.
pub const HEIGHT: u16 = 3;

/// Where each part of the bar lands for a given area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavbarLayout {
    pub title: Rect,
    pub slot: Rect,
    pub logout: Option<Rect>,
}

impl NavbarLayout {
    pub fn compute(bar: &NavBar, area: Rect) -> Self {
        let inner = frame_block().inner(area);
        let logout_width = if bar.show_logout() {
            text_width(LOGOUT_TEXT) + 4
        } else {
            0
        };
        let [title, slot, logout] = Layout::horizontal([
            Constraint::Length(text_width(bar.title()) + 2),
            Constraint::Min(0),
            Constraint::Length(logout_width),
        ])
        .areas(inner);

        Self {
            title,
            slot,
            logout: bar.show_logout().then_some(logout),
        }
    }

    /// Whether (`column`, `row`) is on the logout control.
    pub fn hits_logout(&self, column: u16, row: u16) -> bool {
        self.logout
            .is_some_and(|rect| rect.contains(Position::new(column, row)))
    }
}

fn frame_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default())
}

pub fn render(frame: &mut Frame, bar: &NavBar, area: Rect, logout_hovered: bool) -> NavbarLayout {
    let layout = NavbarLayout::compute(bar, area);
    frame.render_widget(frame_block(), area);

    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {}", bar.title()), theme::title_style())),
        layout.title,
    );

    let slot = Line::from(
        bar.slot()
            .iter()
            .map(|s| Span::styled(format!(" {s} "), theme::key_hint()))
            .collect::<Vec<_>>(),
    );
    frame.render_widget(Paragraph::new(slot), layout.slot);

    if let Some(logout) = layout.logout {
        let mut style = theme::button(true, logout_hovered);
        if logout_hovered {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        frame.render_widget(
            Paragraph::new(Span::styled(format!("[ {LOGOUT_TEXT} ]"), style)),
            logout,
        );
    }

    layout
}
