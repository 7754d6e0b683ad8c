//! # block_progress
//!
//! A thread-safe terminal progress bar drawn with eighth-cell block glyphs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use block_progress::prelude::*;
//!
//! let bar = BlockProgressBar::builder()
//!     .bar_width(50)
//!     .foreground_color(Color::Green)
//!     .font_styles(FontStyles::BOLD)
//!     .show_remaining_time(true)
//!     .build()
//!     .unwrap();
//!
//! for _ in 0..=100 {
//!     bar.tick().unwrap();
//! }
//! ```
//!
//! ## Core Concepts
//!
//! - **BlockProgressBar**: progress state, options and output stream behind one lock
//! - **BarOption**: a single typed setting, applied at build time or later
//! - **Block scale**: the percentage-to-glyphs mapping with 1/8 cell resolution
//! - **ManagedIndicator**: the contract a multi-bar coordinator drives

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bar;
pub mod color;
pub mod error;
pub mod managed;
pub mod options;
pub mod scale;
pub mod style;
pub mod sync;
pub mod timing;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::bar::{BarBuilder, BarPhase, BlockProgressBar};
    pub use crate::color::Color;
    pub use crate::error::BarError;
    pub use crate::managed::ManagedIndicator;
    pub use crate::options::{BarOption, BarOptions, Stream};
    pub use crate::style::FontStyles;
}

// Re-export key types at crate root
pub use bar::{BarBuilder, BarPhase, BlockProgressBar};
pub use color::Color;
pub use error::BarError;
pub use managed::ManagedIndicator;
pub use options::{BarOption, BarOptions, Stream};
pub use style::FontStyles;
