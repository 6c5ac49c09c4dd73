//! Colour constants for the terminal user interface.

use ratatui::style::{Color, Modifier, Style};

/// Selected rows, tabs, help text and warnings.
pub const ACCENT: Color = Color::Yellow;
/// The banner.
pub const BANNER: Color = Color::Green;
/// Hint line and notes headings.
pub const HINT: Color = Color::Magenta;

pub fn accent() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn banner() -> Style {
    Style::default().fg(BANNER).add_modifier(Modifier::BOLD)
}

pub fn hint() -> Style {
    Style::default().fg(HINT).add_modifier(Modifier::BOLD)
}

pub fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}
