//! Font styles and the escape-sequence sink used by the renderer.
//!
//! The renderer never formats escape codes itself. It hands a [`Color`] or
//! a set of [`FontStyles`] to the functions in this module, which write the
//! matching terminal commands into any [`fmt::Write`] target.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use crossterm::Command;
use crossterm::style::{Attribute, SetAttribute, SetForegroundColor};

use crate::color::Color;

bitflags! {
    /// Font style flags.
    ///
    /// Each flag corresponds to an ANSI SGR (Select Graphic Rendition) attribute.
    /// A set carries no order: enabled styles are always emitted in flag
    /// order (bold first, crossed last), whatever order they were given in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontStyles: u8 {
        /// Bold/bright text (SGR 1).
        const BOLD      = 1 << 0;
        /// Dim/faint text (SGR 2).
        const DARK      = 1 << 1;
        /// Italic text (SGR 3).
        const ITALIC    = 1 << 2;
        /// Single underline (SGR 4).
        const UNDERLINE = 1 << 3;
        /// Slow blinking text (SGR 5).
        const BLINK     = 1 << 4;
        /// Reverse video (SGR 7).
        const REVERSED  = 1 << 5;
        /// Concealed/hidden text (SGR 8).
        const CONCEALED = 1 << 6;
        /// Strikethrough text (SGR 9).
        const CROSSED   = 1 << 7;
    }
}

impl FontStyles {
    /// Flags in emission order, with their names and terminal attributes.
    const ATTRIBUTES: [(Self, &'static str, Attribute); 8] = [
        (Self::BOLD, "bold", Attribute::Bold),
        (Self::DARK, "dark", Attribute::Dim),
        (Self::ITALIC, "italic", Attribute::Italic),
        (Self::UNDERLINE, "underline", Attribute::Underlined),
        (Self::BLINK, "blink", Attribute::SlowBlink),
        (Self::REVERSED, "reversed", Attribute::Reverse),
        (Self::CONCEALED, "concealed", Attribute::Hidden),
        (Self::CROSSED, "crossed", Attribute::CrossedOut),
    ];

    /// Terminal attributes for the enabled flags, in emission order.
    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        Self::ATTRIBUTES
            .iter()
            .filter(|(flag, _, _)| self.contains(*flag))
            .map(|(_, _, attr)| *attr)
    }

    /// Parse a single lowercase style name or alias.
    fn from_style_name(name: &str) -> Option<Self> {
        let name = match name {
            "dim" => "dark",
            "reverse" => "reversed",
            "hidden" => "concealed",
            "strike" | "strikethrough" => "crossed",
            other => other,
        };
        Self::ATTRIBUTES
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(flag, _, _)| *flag)
    }

    /// Parse a list of style names separated by whitespace or commas.
    ///
    /// An empty string or `none` yields the empty set.
    ///
    /// # Errors
    ///
    /// Returns [`StyleParseError`] naming the first unknown word.
    pub fn parse(styles: &str) -> Result<Self, StyleParseError> {
        let normalized = styles.trim().to_ascii_lowercase();
        if normalized == "none" {
            return Ok(Self::empty());
        }
        normalized
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|word| !word.is_empty())
            .try_fold(Self::empty(), |acc, word| {
                Self::from_style_name(word)
                    .map(|flag| acc | flag)
                    .ok_or_else(|| StyleParseError::UnknownStyle(word.to_string()))
            })
    }
}

impl fmt::Display for FontStyles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = Self::ATTRIBUTES
            .iter()
            .filter(|(flag, _, _)| self.contains(*flag))
            .map(|(_, name, _)| *name)
            .collect();
        f.write_str(&names.join(" "))
    }
}

impl FromStr for FontStyles {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for font style parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleParseError {
    UnknownStyle(String),
}

impl StyleParseError {
    /// The word that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::UnknownStyle(s) => s,
        }
    }
}

impl fmt::Display for StyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStyle(s) => write!(f, "Unknown font style: {s}"),
        }
    }
}

impl std::error::Error for StyleParseError {}

/// Write the foreground color escape. Nothing is written for [`Color::Unspecified`].
///
/// # Errors
///
/// Propagates formatter errors from the target.
pub fn write_color(out: &mut impl fmt::Write, color: Color) -> fmt::Result {
    match color.to_terminal() {
        Some(term) => SetForegroundColor(term).write_ansi(out),
        None => Ok(()),
    }
}

/// Write one escape per enabled font style.
///
/// # Errors
///
/// Propagates formatter errors from the target.
pub fn write_font_styles(out: &mut impl fmt::Write, styles: FontStyles) -> fmt::Result {
    for attr in styles.attributes() {
        SetAttribute(attr).write_ansi(out)?;
    }
    Ok(())
}

/// Write the escape that resets color and all attributes.
///
/// # Errors
///
/// Propagates formatter errors from the target.
pub fn write_reset(out: &mut impl fmt::Write) -> fmt::Result {
    SetAttribute(Attribute::Reset).write_ansi(out)
}
