//! Common test utilities and logging infrastructure
//!
//! The library logs through the `log` facade. `init_test_logging` installs a
//! `tracing` subscriber that also captures `log` records, so render and
//! completion events show up next to test output.
//!
//! # Environment Variables
//!
//! - `RUST_LOG=trace` - Include one record per render pass
//! - `TEST_LOG_JSON=1` - Output JSON format for CI parsing
//!
//! Not every helper is used by every test binary.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex, Once};

use block_progress::{BarBuilder, BlockProgressBar};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize test logging infrastructure.
///
/// Idempotent; every test may call it.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let use_json = std::env::var("TEST_LOG_JSON").is_ok();
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("block_progress=debug"));

        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_test_writer())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_test_writer()
                        .with_thread_ids(true)
                        .with_target(true)
                        .compact(),
                )
                .try_init()
                .ok();
        }
    });
}

/// In-memory output stream that can be inspected while the bar owns a clone.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Drain everything written so far.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.lock().unwrap());
        String::from_utf8(bytes).unwrap()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Build a bar that renders into a fresh [`SharedBuffer`].
pub fn buffered(builder: BarBuilder) -> (BlockProgressBar, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let bar = builder
        .stream(buffer.clone())
        .build()
        .expect("valid bar options");
    (bar, buffer)
}

/// Make control characters and spaces visible for single-line snapshots.
pub fn visible(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            ' ' => '·',
            '\r' => '⏎',
            '\n' => '↵',
            '\x1b' => '␛',
            other => other,
        })
        .collect()
}
