//! Error types for bar configuration and output.

use std::fmt;
use std::io;

use crate::color::ColorParseError;
use crate::style::StyleParseError;

/// Errors produced while configuring or driving a [`BlockProgressBar`](crate::BlockProgressBar).
#[derive(Debug)]
pub enum BarError {
    /// The maximum progress was zero, negative, or not finite.
    InvalidMaxProgress(f64),
    /// An option name that the bar does not recognize.
    UnknownOption(String),
    /// A textual option value that could not be parsed into the option's type.
    InvalidOptionValue {
        /// Name of the option being set.
        option: &'static str,
        /// The rejected value.
        value: String,
        /// Human readable description of the accepted values.
        expected: &'static str,
    },
    /// Writing to the output stream failed.
    Io(io::Error),
}

impl fmt::Display for BarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMaxProgress(value) => {
                write!(f, "max progress must be finite and positive, got {value}")
            }
            Self::UnknownOption(name) => write!(f, "unknown option: {name}"),
            Self::InvalidOptionValue {
                option,
                value,
                expected,
            } => write!(f, "invalid value {value:?} for option {option}: expected {expected}"),
            Self::Io(err) => write!(f, "output stream error: {err}"),
        }
    }
}

impl std::error::Error for BarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for BarError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ColorParseError> for BarError {
    fn from(err: ColorParseError) -> Self {
        Self::InvalidOptionValue {
            option: "foreground_color",
            value: err.input().to_string(),
            expected: "a color name such as red or cyan",
        }
    }
}

impl From<StyleParseError> for BarError {
    fn from(err: StyleParseError) -> Self {
        Self::InvalidOptionValue {
            option: "font_styles",
            value: err.input().to_string(),
            expected: "font style names such as bold or italic",
        }
    }
}
