//! Colors of the card.
//!
//! Color overrides from the card configuration are parsed with ratatui's
//! color syntax: names (`red`, `light-blue`), hex (`#ff8800`) and indexed
//! colors (`208`). Anything else falls back to the default theme color.

use std::str::FromStr;

use rangecard_config::ColorConfig;
use ratatui::style::{Color, Modifier, Style};
use tracing::debug;

/// Resolved colors used to draw the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Background under the track, if any.
    pub base: Option<Color>,
    /// Unselected part of the track.
    pub track: Color,
    /// Selected range between the handles.
    pub connect: Color,
    /// Handle fill.
    pub handle: Color,
    /// The handle moved by keyboard input.
    pub active_handle: Color,
    /// Title and values text.
    pub text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: None,
            track: Color::DarkGray,
            connect: Color::Cyan,
            handle: Color::White,
            active_handle: Color::Yellow,
            text: Color::White,
        }
    }
}

impl Theme {
    /// Applies the card's color overrides on top of the default theme.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecard_config::ColorConfig;
    /// use rangecard_tui::theme::Theme;
    /// use ratatui::style::Color;
    ///
    /// let colors = ColorConfig {
    ///     connect: Some("#ff8800".to_string()),
    ///     track: Some("var(--slider-color)".to_string()),
    ///     ..Default::default()
    /// };
    /// let theme = Theme::from_colors(&colors);
    /// assert_eq!(theme.connect, Color::Rgb(0xff, 0x88, 0x00));
    /// assert_eq!(theme.track, Theme::default().track);
    /// ```
    #[must_use]
    pub fn from_colors(colors: &ColorConfig) -> Self {
        let default = Self::default();
        let pick = |value: &Option<String>, fallback: Color| {
            value.as_deref().and_then(parse_color).unwrap_or(fallback)
        };
        Self {
            base: colors.base.as_deref().and_then(parse_color),
            track: pick(&colors.track, default.track),
            connect: pick(&colors.connect, default.connect),
            handle: pick(&colors.handle, default.handle),
            active_handle: default.active_handle,
            text: pick(&colors.text, default.text),
        }
    }

    /// Style of the title and values text.
    #[must_use]
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Style of a handle.
    #[must_use]
    pub fn handle_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.active_handle)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.handle)
        }
    }
}

/// Parses a color, or returns `None` if ratatui does not understand it.
#[must_use]
pub fn parse_color(value: &str) -> Option<Color> {
    match Color::from_str(value.trim()) {
        Ok(color) => Some(color),
        Err(_) => {
            debug!(value, "unsupported color, using theme default");
            None
        }
    }
}
