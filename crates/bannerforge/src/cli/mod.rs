//! Command handlers for the Bannerforge CLI.

pub mod config;
pub mod enhance;
pub mod generate;
pub mod interactive;

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner on stderr while a remote call is outstanding.
///
/// Hidden automatically when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
