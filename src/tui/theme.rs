use ratatui::style::{Color, Modifier, Style};

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    /// Breadcrumb header lines (drawn reverse-video)
    pub header: Color,
    /// Foreground of the row under the cursor
    pub highlight: Color,
    /// Status row (drawn reverse-video)
    pub status: Color,
    pub dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Reset,
            text: Color::Reset,
            header: Color::Reset,
            highlight: Color::Yellow,
            status: Color::Yellow,
            dim: Color::DarkGray,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "header" => theme.header = color,
                    "highlight" => theme.highlight = color,
                    "status" => theme.status = color,
                    "dim" => theme.dim = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Plain content rows
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// The row under the cursor
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header)
            .bg(self.background)
            .add_modifier(Modifier::REVERSED)
    }

    pub fn status_style(&self) -> Style {
        Style::default()
            .fg(self.status)
            .bg(self.background)
            .add_modifier(Modifier::REVERSED)
    }

    /// Placeholder text such as "No boards"
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim).bg(self.background)
    }
}
