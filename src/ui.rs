// UI module for consistent terminal output
//
// The only module allowed to print; everything else goes through it or the
// log macros.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner style similar to uv/pnpm
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Print a plain line to standard output (e.g. a resolved URL).
pub fn line(message: &str) {
    println!("{}", message);
}

/// Print a success message with checkmark
pub fn success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print an info/action message with arrow
pub fn action(message: &str) {
    println!("{} {}", style("→").cyan(), message);
}

/// Create a progress bar for downloads; the length is set once the
/// Content-Length is known.
pub fn download_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.cyan} [{bar:25.cyan/dim}] {bytes}/{total_bytes} ({bytes_per_sec})",
            )
            .unwrap()
            .tick_chars(SPINNER_CHARS)
            .progress_chars("━━╺"),
    );
    pb
}

/// Clear a progress bar without leaving a message
pub fn clear_bar(pb: &ProgressBar) {
    pb.finish_and_clear();
}
