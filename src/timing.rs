//! Start-time bookkeeping and duration formatting.

use std::time::{Duration, Instant};

/// Placeholder shown before a start time has been captured.
pub const PLACEHOLDER: &str = "00:00s";

/// Lazily captured start time of a bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeTracker {
    start: Option<Instant>,
}

impl TimeTracker {
    /// Create a tracker with no start time.
    #[must_use]
    pub const fn new() -> Self {
        Self { start: None }
    }

    /// Capture `now` as the start time if timing is `enabled` and nothing
    /// has been captured yet. Returns true if this call captured it.
    pub fn save_start_time_if_needed(&mut self, enabled: bool, now: Instant) -> bool {
        if enabled && self.start.is_none() {
            self.start = Some(now);
            true
        } else {
            false
        }
    }

    /// Forget the start time so the next update captures a new one.
    pub fn clear(&mut self) {
        self.start = None;
    }

    /// Returns true once a start time has been captured.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        self.start.is_some()
    }

    /// The captured start time.
    #[must_use]
    pub const fn start(&self) -> Option<Instant> {
        self.start
    }

    /// Time since the start, or `None` before a start time exists.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.start.map(|start| now.saturating_duration_since(start))
    }
}

/// Estimated total duration: `elapsed * max_progress / progress`.
///
/// Returns zero when no progress has been made.
#[must_use]
pub fn estimated_total(elapsed: Duration, progress: f64, max_progress: f64) -> Duration {
    if progress > 0.0 {
        let secs = elapsed.as_secs_f64() * max_progress / progress;
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

/// Remaining duration: the absolute difference between the estimate and the
/// elapsed time.
///
/// Once progress falls behind the estimate this counts the overrun instead
/// of stopping at zero.
#[must_use]
pub fn remaining(elapsed: Duration, eta: Duration) -> Duration {
    eta.abs_diff(elapsed)
}

/// Format a duration as `MM:SSs`, `HH:MM:SSs` or `Nd:HH:MM:SSs`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if days > 0 {
        format!("{days}d:{hours:02}:{mins:02}:{secs:02}s")
    } else if hours > 0 {
        format!("{hours:02}:{mins:02}:{secs:02}s")
    } else {
        format!("{mins:02}:{secs:02}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_time_captured_once() {
        let mut tracker = TimeTracker::new();
        let first = Instant::now();
        assert!(!tracker.save_start_time_if_needed(false, first));
        assert!(!tracker.is_saved());

        assert!(tracker.save_start_time_if_needed(true, first));
        let later = first + Duration::from_secs(5);
        assert!(!tracker.save_start_time_if_needed(true, later));
        assert_eq!(tracker.start(), Some(first));
        assert_eq!(tracker.elapsed(later), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_clear_allows_recapture() {
        let mut tracker = TimeTracker::new();
        let first = Instant::now();
        tracker.save_start_time_if_needed(true, first);
        tracker.clear();
        assert_eq!(tracker.elapsed(first), None);
        let later = first + Duration::from_secs(1);
        assert!(tracker.save_start_time_if_needed(true, later));
        assert_eq!(tracker.start(), Some(later));
    }

    #[test]
    fn test_estimated_total() {
        let elapsed = Duration::from_secs(10);
        assert_eq!(estimated_total(elapsed, 25.0, 100.0), Duration::from_secs(40));
        assert_eq!(estimated_total(elapsed, 0.0, 100.0), Duration::ZERO);
    }

    #[test]
    fn test_remaining_is_absolute_difference() {
        let elapsed = Duration::from_secs(10);
        assert_eq!(remaining(elapsed, Duration::from_secs(40)), Duration::from_secs(30));
        // Estimate undershoots elapsed time: the overrun is reported.
        assert_eq!(remaining(elapsed, Duration::from_secs(4)), Duration::from_secs(6));
        // No progress yet: eta is zero, remaining equals elapsed.
        assert_eq!(remaining(elapsed, Duration::ZERO), elapsed);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::ZERO), PLACEHOLDER);
        assert_eq!(format_duration(Duration::from_secs(65)), "01:05s");
        assert_eq!(format_duration(Duration::from_millis(59_999)), "00:59s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "01:01:01s");
        assert_eq!(format_duration(Duration::from_secs(90_061)), "1d:01:01:01s");
    }
}
