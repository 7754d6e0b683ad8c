//! Cooperation with a multi-bar coordinator.
//!
//! A bar normally renders itself on every update. A coordinator that stacks
//! several bars into one multi-row display instead flips each child into
//! managed mode. From then on the child's own updates only track state, and
//! output happens when the coordinator calls
//! [`print_progress(true)`](ManagedIndicator::print_progress). Those renders
//! never emit the final newline, since the coordinator owns cursor movement
//! across all of its rows.
//!
//! The coordinator needs nothing beyond this trait:
//!
//! ```rust
//! use block_progress::{BlockProgressBar, ManagedIndicator};
//!
//! fn all_done(children: &[&dyn ManagedIndicator]) -> bool {
//!     children.iter().all(|child| child.is_completed())
//! }
//!
//! let bar = BlockProgressBar::new();
//! bar.adopt();
//! assert!(bar.is_managed());
//! assert!(!all_done(&[&bar]));
//! ```

use std::io;

use crate::bar::BlockProgressBar;

/// An indicator that can run as one child row of a coordinator.
pub trait ManagedIndicator: Send + Sync {
    /// Enter (`true`) or leave (`false`) managed mode.
    fn set_managed(&self, managed: bool);

    /// Whether the indicator is in managed mode.
    fn is_managed(&self) -> bool;

    /// Render one pass; `from_coordinator` marks coordinator-driven renders.
    ///
    /// # Errors
    ///
    /// Propagates output stream errors.
    fn print_progress(&self, from_coordinator: bool) -> io::Result<()>;

    /// Whether the indicator has completed, so the coordinator can stop polling it.
    fn is_completed(&self) -> bool;

    /// Enter managed mode.
    fn adopt(&self) {
        self.set_managed(true);
    }
}

impl ManagedIndicator for BlockProgressBar {
    fn set_managed(&self, managed: bool) {
        BlockProgressBar::set_managed(self, managed);
    }

    fn is_managed(&self) -> bool {
        BlockProgressBar::is_managed(self)
    }

    fn print_progress(&self, from_coordinator: bool) -> io::Result<()> {
        BlockProgressBar::print_progress(self, from_coordinator)
    }

    fn is_completed(&self) -> bool {
        BlockProgressBar::is_completed(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adopt_and_release() {
        let bar = BlockProgressBar::new();
        let child: &dyn ManagedIndicator = &bar;
        child.adopt();
        assert!(child.is_managed());
        child.set_managed(false);
        assert!(!bar.is_managed());
    }

    #[test]
    fn test_managed_updates_track_completion_silently() {
        let bar = BlockProgressBar::builder().max_progress(2.0).build().unwrap();
        let child: &dyn ManagedIndicator = &bar;
        child.adopt();
        // Output goes to stdout, but managed mode writes nothing.
        for _ in 0..3 {
            bar.tick().unwrap();
        }
        assert!(child.is_completed());
        assert_eq!(bar.current(), 2);
    }
}
