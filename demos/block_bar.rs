//! Demo: a block progress bar with timing columns.
//!
//! Run with: cargo run --example block_bar

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use block_progress::prelude::*;

fn main() -> Result<(), BarError> {
    let bar = Arc::new(
        BlockProgressBar::builder()
            .bar_width(60)
            .foreground_color(Color::Cyan)
            .font_styles(FontStyles::BOLD)
            .prefix_text("Fetching ")
            .show_elapsed_time(true)
            .show_remaining_time(true)
            .max_progress(400.0)
            .build()?,
    );

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let bar = Arc::clone(&bar);
            thread::spawn(move || -> Result<(), BarError> {
                for item in 0..100 {
                    thread::sleep(Duration::from_millis(15));
                    if item % 25 == 0 {
                        bar.set_option(BarOption::PostfixText(format!(
                            "worker {worker} at item {item}"
                        )))?;
                    }
                    bar.tick()?;
                }
                Ok(())
            })
        })
        .collect();

    for worker in workers {
        if let Ok(result) = worker.join() {
            result?;
        }
    }

    bar.set_option(BarOption::PostfixText(String::from("done")))?;
    bar.mark_as_completed()?;
    Ok(())
}
