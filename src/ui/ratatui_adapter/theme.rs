//! Color theme definitions for the ratatui TUI
//!
//! Defines colors and styles used throughout the gallery.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the tile under the cursor
    pub selection_bg: Color,
    /// Foreground color for the tile under the cursor
    pub selection_fg: Color,
    /// Color for the active filter tab
    pub accent: Color,
    /// Color for tiles whose media failed to display
    pub error: Color,
    /// Color for status information
    pub info: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
    /// Color for like counts
    pub likes: Color,
    /// Color for comment counts
    pub comments: Color,
    /// Color for media urls
    pub url: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            accent: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
            likes: Color::Magenta,
            comments: Color::Green,
            url: Color::White,
        }
    }

    /// Style for the tile under the cursor
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the active filter tab
    #[must_use]
    pub fn active_tab_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    /// Style for failed tiles
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    #[must_use]
    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    #[must_use]
    pub fn likes_style(&self) -> Style {
        Style::default().fg(self.likes)
    }

    #[must_use]
    pub fn comments_style(&self) -> Style {
        Style::default().fg(self.comments)
    }

    #[must_use]
    pub fn url_style(&self) -> Style {
        Style::default().fg(self.url)
    }
}
