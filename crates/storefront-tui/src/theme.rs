//! Palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ───────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const HIGHLIGHT: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const FAVORITE: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const TEXT: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const MUTED: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Semantic styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT)
}

pub fn border_default() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// Selected list row.
pub fn selected() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn error() -> Style {
    Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD)
}

pub fn favorite() -> Style {
    Style::default().fg(FAVORITE)
}

/// Primary button; dimmed while disabled.
pub fn button(enabled: bool, focused: bool) -> Style {
    match (enabled, focused) {
        (false, _) => Style::default().fg(MUTED),
        (true, true) => Style::default()
            .fg(BG_DARK)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    }
}

pub fn tooltip() -> Style {
    Style::default().fg(BG_DARK).bg(HIGHLIGHT)
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}
