//! Streamed response printing.
//!
//! Fragments are printed as they arrive, with a spinner until the first
//! one. The completion turn is only persisted by the cache once the stream
//! is exhausted, so fully draining the handle here is what completes the
//! turn.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use parley_application::ports::completion::StreamHandle;
use parley_domain::StreamEvent;
use std::io::Write;
use std::time::Duration;

/// Print a streamed response to stdout as fragments arrive.
///
/// Returns the full response text, or `None` if the stream ended with an
/// error (printed to stderr).
pub async fn print_stream(mut handle: StreamHandle) -> Option<String> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut printed_any = false;
    let mut full_text = String::new();
    while let Some(event) = handle.next_event().await {
        if !printed_any {
            spinner.finish_and_clear();
        }
        match event {
            StreamEvent::Delta(chunk) => {
                printed_any = true;
                print!("{}", chunk.cyan());
                let _ = std::io::stdout().flush();
                full_text.push_str(&chunk);
            }
            StreamEvent::Completed(text) => {
                if !printed_any {
                    // Provider sent no deltas; print the final text whole.
                    println!("{}", text.cyan());
                    return Some(text);
                }
                println!();
                return Some(full_text);
            }
            StreamEvent::Error(e) => {
                eprintln!("{}", format!("Error: {e}").red());
                return None;
            }
        }
    }

    // Stream closed without a terminal event.
    spinner.finish_and_clear();
    if printed_any {
        println!();
    }
    Some(full_text)
}
