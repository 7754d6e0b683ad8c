//! The block progress bar.
//!
//! A [`BlockProgressBar`] owns one mutex guarding its options, progress
//! counter, start time and output stream together. Every public entry point
//! takes that lock exactly once, so a progress update, the start-time
//! bookkeeping that follows it and the render pass it triggers form a single
//! critical section.
//!
//! # Rendered line
//!
//! ```text
//! <color><styles><prefix>[█████▍    ] 54% [00:03s<00:02s] <postfix><pad>\r
//! ```
//!
//! The line ends in a carriage return so the next render overwrites it in
//! place. When the bar completes in standalone mode the line is followed by
//! an attribute reset and a newline.

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::color::Color;
use crate::error::BarError;
use crate::options::{BarOption, BarOptions, Stream};
use crate::scale::write_block_scale;
use crate::style::{FontStyles, write_color, write_font_styles, write_reset};
use crate::sync::lock_recover;
use crate::timing::{self, TimeTracker};

/// Cap on the cells used to size the line buffer up front.
const MAX_CAPACITY_HINT_CELLS: usize = 4096;

/// Lifecycle phase of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarPhase {
    /// Constructed, never rendered.
    Idle,
    /// At least one render pass has run and the bar is not complete.
    Rendering,
    /// Progress passed the maximum or completion was forced.
    Completed,
}

/// Thread-safe progress bar drawn with eighth-cell block glyphs.
///
/// # Thread Safety
///
/// `BlockProgressBar` is `Send + Sync`; share it with `Arc`. Concurrent
/// [`tick`](Self::tick) calls are serialized, so N ticks always advance the
/// progress by exactly N. A render pass holds the lock while writing and
/// flushing, so a blocked output stream blocks every caller of the same bar.
///
/// # Example
///
/// ```rust,no_run
/// use block_progress::BlockProgressBar;
///
/// let bar = BlockProgressBar::builder()
///     .bar_width(40)
///     .prefix_text("Copying ")
///     .show_elapsed_time(true)
///     .build()
///     .unwrap();
///
/// for _ in 0..100 {
///     bar.tick().unwrap();
/// }
/// bar.mark_as_completed().unwrap();
/// ```
#[derive(Debug)]
pub struct BlockProgressBar {
    state: Mutex<BarState>,
    managed: AtomicBool,
}

#[derive(Debug)]
struct BarState {
    options: BarOptions,
    progress: f64,
    completed: bool,
    rendered: bool,
    timer: TimeTracker,
    stream: Stream,
}

impl Default for BlockProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockProgressBar {
    /// Create a bar with default options, writing to standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::from_state(BarState::new())
    }

    /// Start building a bar with custom options.
    #[must_use]
    pub fn builder() -> BarBuilder {
        BarBuilder::new()
    }

    fn from_state(state: BarState) -> Self {
        Self {
            state: Mutex::new(state),
            managed: AtomicBool::new(false),
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Apply one option.
    ///
    /// # Errors
    ///
    /// Returns [`BarError::InvalidMaxProgress`] when setting a maximum that is
    /// not finite and positive. The bar keeps its previous maximum.
    pub fn set_option(&self, option: BarOption) -> Result<(), BarError> {
        let mut state = lock_recover(&self.state);
        state.apply(option, Instant::now())
    }

    /// Snapshot of the current display options.
    #[must_use]
    pub fn options(&self) -> BarOptions {
        lock_recover(&self.state).options.clone()
    }

    // ========================================================================
    // Progress
    // ========================================================================

    /// Replace the progress value and render.
    ///
    /// Values above the maximum are kept (and complete the bar); negative
    /// and NaN values are stored as zero.
    ///
    /// # Errors
    ///
    /// Propagates write and flush errors from the output stream.
    pub fn set_progress(&self, value: f64) -> io::Result<()> {
        let value = if value.is_nan() || value < 0.0 {
            log::warn!("progress {value} is not a non-negative number, using 0");
            0.0
        } else {
            value
        };
        self.update(|progress| *progress = value)
    }

    /// Advance the progress by one and render.
    ///
    /// # Errors
    ///
    /// Propagates write and flush errors from the output stream.
    pub fn tick(&self) -> io::Result<()> {
        self.update(|progress| *progress += 1.0)
    }

    fn update(&self, mutate: impl FnOnce(&mut f64)) -> io::Result<()> {
        let mut state = lock_recover(&self.state);
        mutate(&mut state.progress);
        let now = Instant::now();
        if state.save_start_time_if_needed(now) {
            log::debug!("captured start time for elapsed/remaining display");
        }
        self.render_locked(&mut state, false, now)
    }

    /// Progress clamped to `0..=max_progress` and truncated to an integer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn current(&self) -> u64 {
        let state = lock_recover(&self.state);
        let clamped = state.progress.min(state.options.max_progress).max(0.0);
        clamped.floor() as u64
    }

    /// The raw progress value, which may exceed the maximum.
    #[must_use]
    pub fn progress(&self) -> f64 {
        lock_recover(&self.state).progress
    }

    /// Whether the bar has completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        lock_recover(&self.state).completed
    }

    /// Force completion regardless of progress, then render.
    ///
    /// # Errors
    ///
    /// Propagates write and flush errors from the output stream.
    pub fn mark_as_completed(&self) -> io::Result<()> {
        let mut state = lock_recover(&self.state);
        if !state.completed {
            log::debug!("bar marked as completed at progress {}", state.progress);
        }
        state.completed = true;
        self.render_locked(&mut state, false, Instant::now())
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> BarPhase {
        let state = lock_recover(&self.state);
        if state.completed {
            BarPhase::Completed
        } else if state.rendered {
            BarPhase::Rendering
        } else {
            BarPhase::Idle
        }
    }

    /// Whether a start time for the timing columns has been captured.
    #[must_use]
    pub fn has_saved_start_time(&self) -> bool {
        lock_recover(&self.state).timer.is_saved()
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Switch between standalone and managed mode.
    ///
    /// In managed mode only coordinator-flagged renders produce output.
    pub fn set_managed(&self, managed: bool) {
        self.managed.store(managed, Ordering::Release);
    }

    /// Whether the bar is driven by a coordinator.
    #[must_use]
    pub fn is_managed(&self) -> bool {
        self.managed.load(Ordering::Acquire)
    }

    /// Run one render pass.
    ///
    /// In managed mode a call with `from_coordinator == false` only updates
    /// the completed flag. A coordinator-flagged render writes the line but
    /// never the final reset and newline.
    ///
    /// # Errors
    ///
    /// Propagates write and flush errors from the output stream.
    pub fn print_progress(&self, from_coordinator: bool) -> io::Result<()> {
        let mut state = lock_recover(&self.state);
        self.render_locked(&mut state, from_coordinator, Instant::now())
    }

    /// The exact text a render pass would write now, without writing it.
    #[must_use]
    pub fn render_line(&self, from_coordinator: bool) -> String {
        let state = lock_recover(&self.state);
        let mut line = state.compose_line(Instant::now()).unwrap_or_default();
        if state.will_complete() && !from_coordinator {
            let _ = write_finish(&mut line);
        }
        line
    }

    fn render_locked(
        &self,
        state: &mut BarState,
        from_coordinator: bool,
        now: Instant,
    ) -> io::Result<()> {
        if self.is_managed() && !from_coordinator {
            state.complete_on_overflow();
            return Ok(());
        }

        let line = state.compose_line(now).map_err(io::Error::other)?;
        log::trace!("rendering bar at progress {}", state.progress);
        state.rendered = true;
        // Completion tracks progress even when the stream fails.
        state.complete_on_overflow();
        state.stream.write_all(line.as_bytes())?;
        state.stream.flush()?;

        if state.completed && !from_coordinator {
            let mut tail = String::new();
            write_finish(&mut tail).map_err(io::Error::other)?;
            state.stream.write_all(tail.as_bytes())?;
            state.stream.flush()?;
        }
        Ok(())
    }
}

impl BarState {
    fn new() -> Self {
        Self {
            options: BarOptions::default(),
            progress: 0.0,
            completed: false,
            rendered: false,
            timer: TimeTracker::new(),
            stream: Stream::default(),
        }
    }

    fn apply(&mut self, option: BarOption, now: Instant) -> Result<(), BarError> {
        log::debug!("setting bar option {}", option.name());
        let options = &mut self.options;
        match option {
            BarOption::ForegroundColor(color) => options.foreground_color = color,
            BarOption::BarWidth(width) => options.bar_width = width,
            BarOption::Start(start) => options.start = start,
            BarOption::End(end) => options.end = end,
            BarOption::PrefixText(text) => options.prefix_text = text,
            BarOption::PostfixText(text) => options.set_postfix_text(text),
            BarOption::ShowPercentage(show) => options.show_percentage = show,
            BarOption::ShowElapsedTime(show) => options.show_elapsed_time = show,
            BarOption::ShowRemainingTime(show) => options.show_remaining_time = show,
            BarOption::MaxPostfixTextLen(len) => options.set_max_postfix_text_len(len),
            BarOption::FontStyles(styles) => options.font_styles = styles,
            BarOption::MaxProgress(max) => {
                if let Err(err) = options.set_max_progress(max) {
                    log::warn!("rejected option max_progress: {err}");
                    return Err(err);
                }
            }
            BarOption::Completed(true) => self.completed = true,
            BarOption::Completed(false) => {
                if self.completed {
                    log::warn!("ignoring completed=false on a completed bar");
                }
            }
            BarOption::SavedStartTime(true) => {
                self.timer.save_start_time_if_needed(true, now);
            }
            BarOption::SavedStartTime(false) => self.timer.clear(),
            BarOption::Stream(stream) => self.stream = stream,
        }
        Ok(())
    }

    fn save_start_time_if_needed(&mut self, now: Instant) -> bool {
        let enabled = self.options.shows_time();
        self.timer.save_start_time_if_needed(enabled, now)
    }

    fn will_complete(&self) -> bool {
        self.completed || self.progress > self.options.max_progress
    }

    fn complete_on_overflow(&mut self) {
        if !self.completed && self.progress > self.options.max_progress {
            log::debug!(
                "bar completed: progress {} exceeds maximum {}",
                self.progress,
                self.options.max_progress
            );
            self.completed = true;
        }
    }

    fn percent(&self) -> f64 {
        self.progress / self.options.max_progress * 100.0
    }

    fn compose_line(&self, now: Instant) -> Result<String, fmt::Error> {
        let options = &self.options;
        let hint = options.bar_width.min(MAX_CAPACITY_HINT_CELLS) * 3 + 64;
        let mut line = String::with_capacity(hint);

        write_styles(&mut line, options.foreground_color, options.font_styles)?;
        line.push_str(&options.prefix_text);
        line.push_str(&options.start);
        write_block_scale(&mut line, self.percent(), options.bar_width)?;
        line.push_str(&options.end);

        if options.show_percentage {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let shown = (self.percent().max(0.0) as u64).min(100);
            write!(line, " {shown}%")?;
        }

        let elapsed = self.timer.elapsed(now);
        if options.show_elapsed_time {
            line.push_str(" [");
            match elapsed {
                Some(elapsed) => line.push_str(&timing::format_duration(elapsed)),
                None => line.push_str(timing::PLACEHOLDER),
            }
        }
        if options.show_remaining_time {
            line.push_str(if options.show_elapsed_time { "<" } else { " [" });
            match elapsed {
                Some(elapsed) => {
                    let eta =
                        timing::estimated_total(elapsed, self.progress, options.max_progress);
                    line.push_str(&timing::format_duration(timing::remaining(elapsed, eta)));
                }
                None => line.push_str(timing::PLACEHOLDER),
            }
            line.push(']');
        } else if options.show_elapsed_time {
            line.push(']');
        }

        line.push(' ');
        line.push_str(&options.postfix_text);
        line.extend(std::iter::repeat_n(' ', options.postfix_pad()));
        line.push('\r');
        Ok(line)
    }
}

fn write_styles(out: &mut String, color: Color, styles: FontStyles) -> fmt::Result {
    write_color(out, color)?;
    write_font_styles(out, styles)
}

/// Reset attributes and move past the bar's row for good.
fn write_finish(out: &mut String) -> fmt::Result {
    write_reset(out)?;
    out.push('\n');
    Ok(())
}

/// Fluent builder for [`BlockProgressBar`].
///
/// Options are applied in the order they were given, so a later call for
/// the same option wins (except for the never-decreasing postfix width).
#[derive(Debug, Default)]
#[must_use]
pub struct BarBuilder {
    options: Vec<BarOption>,
}

impl BarBuilder {
    /// Create a builder with every option at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue any option.
    pub fn option(mut self, option: BarOption) -> Self {
        self.options.push(option);
        self
    }

    /// Set the foreground color.
    pub fn foreground_color(self, color: Color) -> Self {
        self.option(BarOption::ForegroundColor(color))
    }

    /// Set the track width in cells (default 100).
    pub fn bar_width(self, width: usize) -> Self {
        self.option(BarOption::BarWidth(width))
    }

    /// Set the opening delimiter (default `[`).
    pub fn start(self, start: impl Into<String>) -> Self {
        self.option(BarOption::Start(start.into()))
    }

    /// Set the closing delimiter (default `]`).
    pub fn end(self, end: impl Into<String>) -> Self {
        self.option(BarOption::End(end.into()))
    }

    /// Set the text drawn before the track.
    pub fn prefix_text(self, text: impl Into<String>) -> Self {
        self.option(BarOption::PrefixText(text.into()))
    }

    /// Set the text drawn after the percentage and timing columns.
    pub fn postfix_text(self, text: impl Into<String>) -> Self {
        self.option(BarOption::PostfixText(text.into()))
    }

    /// Set whether to show the percentage (default true).
    pub fn show_percentage(self, show: bool) -> Self {
        self.option(BarOption::ShowPercentage(show))
    }

    /// Set whether to show elapsed time.
    pub fn show_elapsed_time(self, show: bool) -> Self {
        self.option(BarOption::ShowElapsedTime(show))
    }

    /// Set whether to show the remaining time estimate.
    pub fn show_remaining_time(self, show: bool) -> Self {
        self.option(BarOption::ShowRemainingTime(show))
    }

    /// Reserve at least `len` cells for the postfix.
    pub fn max_postfix_text_len(self, len: usize) -> Self {
        self.option(BarOption::MaxPostfixTextLen(len))
    }

    /// Set the font styles.
    pub fn font_styles(self, styles: FontStyles) -> Self {
        self.option(BarOption::FontStyles(styles))
    }

    /// Set the progress value that corresponds to 100% (default 100).
    pub fn max_progress(self, max: f64) -> Self {
        self.option(BarOption::MaxProgress(max))
    }

    /// Render into `writer` instead of standard output.
    pub fn stream(self, writer: impl Write + Send + 'static) -> Self {
        self.option(BarOption::Stream(Stream::writer(writer)))
    }

    /// Render into standard error.
    pub fn stderr(self) -> Self {
        self.option(BarOption::Stream(Stream::stderr()))
    }

    /// Build the bar.
    ///
    /// # Errors
    ///
    /// Returns the first option that fails validation, which can only be an
    /// invalid [`BarOption::MaxProgress`].
    pub fn build(self) -> Result<BlockProgressBar, BarError> {
        let mut state = BarState::new();
        let now = Instant::now();
        for option in self.options {
            state.apply(option, now)?;
        }
        Ok(BlockProgressBar::from_state(state))
    }
}
