//! Foreground colors for the progress bar.
//!
//! The bar supports the eight classic terminal colors plus an
//! `Unspecified` value, which leaves the terminal's current color untouched.
//!
//! # Examples
//!
//! ```
//! use block_progress::color::Color;
//!
//! let green: Color = "green".parse().unwrap();
//! assert_eq!(green, Color::Green);
//! assert!(Color::Unspecified.is_unspecified());
//! ```

use std::fmt;
use std::str::FromStr;

use crossterm::style::Color as TermColor;

/// Foreground color of the rendered bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// No color escape is emitted.
    #[default]
    Unspecified,
    Grey,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// All colors, in palette order.
    pub const ALL: [Self; 9] = [
        Self::Unspecified,
        Self::Grey,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// Get the name of this color.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Grey => "grey",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }

    /// Returns true if no color should be applied.
    #[must_use]
    pub const fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }

    /// Map onto the terminal palette, or `None` when unspecified.
    #[must_use]
    pub const fn to_terminal(self) -> Option<TermColor> {
        match self {
            Self::Unspecified => None,
            Self::Grey => Some(TermColor::DarkGrey),
            Self::Red => Some(TermColor::DarkRed),
            Self::Green => Some(TermColor::DarkGreen),
            Self::Yellow => Some(TermColor::DarkYellow),
            Self::Blue => Some(TermColor::DarkBlue),
            Self::Magenta => Some(TermColor::DarkMagenta),
            Self::Cyan => Some(TermColor::DarkCyan),
            Self::White => Some(TermColor::White),
        }
    }

    /// Parse a color name (case-insensitive, `gray` accepted for `grey`).
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError`] for empty input or an unknown name.
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        let normalized = color.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if normalized == "gray" {
            return Ok(Self::Grey);
        }
        Self::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| ColorParseError::UnknownColor(color.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    UnknownColor(String),
}

impl ColorParseError {
    /// The input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::UnknownColor(s) => s,
        }
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(Color::parse("red"), Ok(Color::Red));
        assert_eq!(Color::parse(" Cyan "), Ok(Color::Cyan));
        assert_eq!(Color::parse("gray"), Ok(Color::Grey));
        assert_eq!(Color::parse("unspecified"), Ok(Color::Unspecified));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Color::parse(""), Err(ColorParseError::Empty));
        assert_eq!(
            Color::parse("mauve"),
            Err(ColorParseError::UnknownColor("mauve".into()))
        );
    }

    #[test]
    fn test_name_round_trips() {
        for color in Color::ALL {
            assert_eq!(color.name().parse::<Color>(), Ok(color));
        }
    }

    #[test]
    fn test_terminal_mapping() {
        assert_eq!(Color::Unspecified.to_terminal(), None);
        assert_eq!(Color::Red.to_terminal(), Some(TermColor::DarkRed));
        assert_eq!(Color::White.to_terminal(), Some(TermColor::White));
    }
}
