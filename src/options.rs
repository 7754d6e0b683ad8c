//! Bar configuration.
//!
//! [`BarOptions`] holds the display settings of a bar with their documented
//! defaults. [`BarOption`] names a single setting together with a value of
//! the right type and is what [`BlockProgressBar::set_option`] and
//! [`BarBuilder::option`] accept. Because each variant carries a typed value,
//! a mistyped option cannot be constructed at all. Options arriving as text
//! (environment variables, config files) go through [`BarOption::parse`].
//!
//! [`BlockProgressBar::set_option`]: crate::BlockProgressBar::set_option
//! [`BarBuilder::option`]: crate::BarBuilder::option

use std::fmt;
use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::color::Color;
use crate::error::BarError;
use crate::style::FontStyles;

/// Postfix padding used when no postfix width has been recorded.
pub const DEFAULT_POSTFIX_PAD: usize = 10;

/// Writable sink a bar renders into.
pub struct Stream {
    label: &'static str,
    inner: Box<dyn Write + Send>,
}

impl Stream {
    /// Standard output (the default).
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            label: "stdout",
            inner: Box::new(io::stdout()),
        }
    }

    /// Standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            label: "stderr",
            inner: Box::new(io::stderr()),
        }
    }

    /// Any other writer, such as a file or an in-memory buffer.
    #[must_use]
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            label: "writer",
            inner: Box::new(writer),
        }
    }
}

impl Default for Stream {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Stream").field(&self.label).finish()
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Display settings of a bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarOptions {
    pub foreground_color: Color,
    /// Width of the block track in cells.
    pub bar_width: usize,
    /// Opening delimiter of the track.
    pub start: String,
    /// Closing delimiter of the track.
    pub end: String,
    pub prefix_text: String,
    pub postfix_text: String,
    pub show_percentage: bool,
    pub show_elapsed_time: bool,
    pub show_remaining_time: bool,
    /// Widest postfix seen so far, in cells. Never decreases.
    /// Zero means "not yet known" and renders as [`DEFAULT_POSTFIX_PAD`].
    pub max_postfix_text_len: usize,
    pub font_styles: FontStyles,
    /// Progress value that corresponds to 100%.
    pub max_progress: f64,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            foreground_color: Color::Unspecified,
            bar_width: 100,
            start: String::from("["),
            end: String::from("]"),
            prefix_text: String::new(),
            postfix_text: String::new(),
            show_percentage: true,
            show_elapsed_time: false,
            show_remaining_time: false,
            max_postfix_text_len: 0,
            font_styles: FontStyles::empty(),
            max_progress: 100.0,
        }
    }
}

impl BarOptions {
    /// Replace the postfix text, growing `max_postfix_text_len` if needed.
    pub fn set_postfix_text(&mut self, text: String) {
        self.max_postfix_text_len = self.max_postfix_text_len.max(text.width());
        self.postfix_text = text;
    }

    /// Raise `max_postfix_text_len` to `len`. Smaller values are ignored.
    pub fn set_max_postfix_text_len(&mut self, len: usize) {
        self.max_postfix_text_len = self.max_postfix_text_len.max(len);
    }

    /// Replace the maximum progress after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`BarError::InvalidMaxProgress`] for zero, negative or
    /// non-finite values, leaving the current value in place.
    pub fn set_max_progress(&mut self, max_progress: f64) -> Result<(), BarError> {
        if max_progress.is_finite() && max_progress > 0.0 {
            self.max_progress = max_progress;
            Ok(())
        } else {
            Err(BarError::InvalidMaxProgress(max_progress))
        }
    }

    /// Postfix padding actually rendered, normalising the zero default.
    #[must_use]
    pub const fn postfix_pad(&self) -> usize {
        if self.max_postfix_text_len == 0 {
            DEFAULT_POSTFIX_PAD
        } else {
            self.max_postfix_text_len
        }
    }

    /// Whether either timing column is displayed.
    #[must_use]
    pub const fn shows_time(&self) -> bool {
        self.show_elapsed_time || self.show_remaining_time
    }
}

/// A single bar setting with a value of its declared type.
#[derive(Debug)]
pub enum BarOption {
    ForegroundColor(Color),
    BarWidth(usize),
    Start(String),
    End(String),
    PrefixText(String),
    PostfixText(String),
    ShowPercentage(bool),
    ShowElapsedTime(bool),
    ShowRemainingTime(bool),
    /// Force completion. Completion is one-way, so `false` only has an
    /// effect before the bar has completed.
    Completed(bool),
    /// `false` discards the captured start time; `true` captures one now if
    /// none exists.
    SavedStartTime(bool),
    MaxPostfixTextLen(usize),
    FontStyles(FontStyles),
    MaxProgress(f64),
    Stream(Stream),
}

/// Option names accepted by [`BarOption::parse`].
pub const OPTION_NAMES: [&str; 15] = [
    "foreground_color",
    "bar_width",
    "start",
    "end",
    "prefix_text",
    "postfix_text",
    "show_percentage",
    "show_elapsed_time",
    "show_remaining_time",
    "completed",
    "saved_start_time",
    "max_postfix_text_len",
    "font_styles",
    "max_progress",
    "stream",
];

impl BarOption {
    /// The textual name of this option.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ForegroundColor(_) => "foreground_color",
            Self::BarWidth(_) => "bar_width",
            Self::Start(_) => "start",
            Self::End(_) => "end",
            Self::PrefixText(_) => "prefix_text",
            Self::PostfixText(_) => "postfix_text",
            Self::ShowPercentage(_) => "show_percentage",
            Self::ShowElapsedTime(_) => "show_elapsed_time",
            Self::ShowRemainingTime(_) => "show_remaining_time",
            Self::Completed(_) => "completed",
            Self::SavedStartTime(_) => "saved_start_time",
            Self::MaxPostfixTextLen(_) => "max_postfix_text_len",
            Self::FontStyles(_) => "font_styles",
            Self::MaxProgress(_) => "max_progress",
            Self::Stream(_) => "stream",
        }
    }

    /// Build an option from its textual name and value.
    ///
    /// # Errors
    ///
    /// [`BarError::UnknownOption`] if `name` is not a known option, and
    /// [`BarError::InvalidOptionValue`] if `value` does not parse as the
    /// option's type.
    pub fn parse(name: &str, value: &str) -> Result<Self, BarError> {
        let option = match name.trim() {
            "foreground_color" => Self::ForegroundColor(value.parse::<Color>()?),
            "bar_width" => Self::BarWidth(parse_usize("bar_width", value)?),
            "start" => Self::Start(value.to_string()),
            "end" => Self::End(value.to_string()),
            "prefix_text" => Self::PrefixText(value.to_string()),
            "postfix_text" => Self::PostfixText(value.to_string()),
            "show_percentage" => Self::ShowPercentage(parse_bool("show_percentage", value)?),
            "show_elapsed_time" => Self::ShowElapsedTime(parse_bool("show_elapsed_time", value)?),
            "show_remaining_time" => {
                Self::ShowRemainingTime(parse_bool("show_remaining_time", value)?)
            }
            "completed" => Self::Completed(parse_bool("completed", value)?),
            "saved_start_time" => Self::SavedStartTime(parse_bool("saved_start_time", value)?),
            "max_postfix_text_len" => {
                Self::MaxPostfixTextLen(parse_usize("max_postfix_text_len", value)?)
            }
            "font_styles" => Self::FontStyles(value.parse::<FontStyles>()?),
            "max_progress" => Self::MaxProgress(parse_f64("max_progress", value)?),
            "stream" => Self::Stream(parse_stream(value)?),
            other => return Err(BarError::UnknownOption(other.to_string())),
        };
        Ok(option)
    }
}

fn invalid(option: &'static str, value: &str, expected: &'static str) -> BarError {
    BarError::InvalidOptionValue {
        option,
        value: value.to_string(),
        expected,
    }
}

fn parse_bool(option: &'static str, value: &str) -> Result<bool, BarError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(option, value, "a boolean (true/false)")),
    }
}

fn parse_usize(option: &'static str, value: &str) -> Result<usize, BarError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(option, value, "a non-negative integer"))
}

fn parse_f64(option: &'static str, value: &str) -> Result<f64, BarError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(option, value, "a number"))
}

fn parse_stream(value: &str) -> Result<Stream, BarError> {
    match value.trim() {
        "stdout" => Ok(Stream::stdout()),
        "stderr" => Ok(Stream::stderr()),
        _ => Err(invalid("stream", value, "stdout or stderr")),
    }
}
