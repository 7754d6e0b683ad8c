//! Thread safety tests for block_progress.
//!
//! This module verifies:
//! 1. All public types are Send + Sync (compile-time verification)
//! 2. Concurrent ticks are never lost
//! 3. Rendering and option changes from many threads are safe

mod common;

use std::sync::Arc;
use std::thread;

use block_progress::prelude::*;
use common::{buffered, init_test_logging};

// ============================================================================
// COMPILE-TIME SEND + SYNC VERIFICATION
// ============================================================================

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_public_types_are_send_sync() {
    assert_send_sync::<BlockProgressBar>();
    assert_send_sync::<BarOptions>();
    assert_send_sync::<BarPhase>();
    assert_send_sync::<Color>();
    assert_send_sync::<FontStyles>();
    assert_send_sync::<Arc<dyn ManagedIndicator>>();
}

// ============================================================================
// CONCURRENT UPDATES
// ============================================================================

#[test]
fn test_concurrent_ticks_are_not_lost() {
    init_test_logging();
    let (bar, _out) = buffered(BlockProgressBar::builder().bar_width(10).max_progress(10_000.0));
    let bar = Arc::new(bar);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let bar = Arc::clone(&bar);
            thread::spawn(move || {
                for _ in 0..250 {
                    bar.tick().unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("ticking thread panicked");
    }

    assert_eq!(bar.current(), 2000);
    assert!(!bar.is_completed());
}

#[test]
fn test_concurrent_ticks_past_maximum() {
    init_test_logging();
    let (bar, out) = buffered(BlockProgressBar::builder().bar_width(10));
    let bar = Arc::new(bar);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let bar = Arc::clone(&bar);
            thread::spawn(move || {
                for _ in 0..50 {
                    bar.tick().unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("ticking thread panicked");
    }

    assert_eq!(bar.current(), 100);
    assert!((bar.progress() - 200.0).abs() < f64::EPSILON);
    assert!(bar.is_completed());

    // Every render pass wrote a whole line; no two passes interleaved.
    let text = out.take();
    assert_eq!(text.matches('\r').count(), 200);
    assert_eq!(text.matches('\n').count(), 100);
}

#[test]
fn test_options_and_renders_from_many_threads() {
    init_test_logging();
    let (bar, out) = buffered(BlockProgressBar::builder().bar_width(6));
    let bar = Arc::new(bar);

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let bar = Arc::clone(&bar);
            thread::spawn(move || {
                for j in 0..20 {
                    bar.set_option(BarOption::PostfixText("x".repeat(i + j)))
                        .unwrap();
                    bar.set_progress(f64::from(u32::try_from(j).unwrap())).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    assert_eq!(bar.options().max_postfix_text_len, 5 + 19);
    assert_eq!(out.take().matches('\r').count(), 120);
}
