//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system, supporting both built-in themes
//! and custom themes loaded from TOML files. It provides utilities for
//! converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `phonebook-dark`: Dark theme (default)
//! - `phonebook-light`: Light theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e0def4"
//! text_normal = "#e0def4"
//! text_dim = "#6e6a86"
//! border = "#393552"
//! section_fg = "#9ccfd8"
//! favorite_fg = "#f6c177"
//! match_highlight_fg = "#232136"
//! match_highlight_bg = "#f6c177"
//! empty_state_fg = "#c4a7e7"
//! error_fg = "#eb6f92"
//! notice_fg = "#3e8fb0"
//! ```
//!
//! # Example
//!
//! ```rust
//! use phonebook::ui::theme::Theme;
//!
//! let theme = Theme::from_name("phonebook-light").unwrap();
//! let line = format!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert!(line.ends_with("\u{1b}[0m"));
//! assert_eq!(theme.name, "phonebook-light");
//! ```

use crate::domain::error::{PhonebookError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "phonebook-dark";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are specified as hex strings (e.g., "#e0def4").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Section title color.
    pub section_fg: String,
    /// Favorite marker color.
    pub favorite_fg: String,

    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Error banner and form error color.
    pub error_fg: String,
    /// Success notice color.
    pub notice_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the theme name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "phonebook-dark" => include_str!("../../themes/phonebook-dark.toml"),
            "phonebook-light" => include_str!("../../themes/phonebook-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PhonebookError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            PhonebookError::Config(format!(
                "failed to read theme file {}: {e}",
                path.as_ref().display()
            ))
        })?;

        toml::from_str(&contents)
            .map_err(|e| PhonebookError::Config(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim, etc.).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (`phonebook-dark`).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("Built-in phonebook-dark theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        assert_eq!(Theme::default().name, DEFAULT_THEME);
        let light = Theme::from_name("phonebook-light").unwrap();
        assert!(light.colors.header_bg.is_none());
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn custom_theme_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        write!(file, "{}", toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(file.path()).unwrap(), theme);
    }

    #[test]
    fn bad_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("#zz"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::bg("#010203"), "\u{1b}[48;2;1;2;3m");
    }
}
