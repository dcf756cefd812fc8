//! Styled log lines for action output.
//!
//! Plain single-line messages, styled with the `console` crate. GitHub
//! Actions renders ANSI colors in its log view; `console` drops them when
//! the stream is not a terminal.

use std::sync::atomic::{AtomicBool, Ordering};

use console::style;

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable or disable debug-level lines for the process
pub fn set_debug(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Print an error message in red to stderr
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a warning message in yellow to stderr
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("WARNING:").yellow().bold(), message);
}

/// Print a status message with a yellow arrow
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a success message with a green checkmark
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a debug message, suppressed unless debug is enabled
pub fn display_debug(message: &str) {
    if DEBUG_ENABLED.load(Ordering::Relaxed) {
        println!("{} {}", style("DEBUG:").dim(), message);
    }
}

/// Print what a mutating call would have done in dry-run mode
pub fn display_dry_run(message: &str) {
    println!("{} {}", style("[dry-run]").cyan(), message);
}

/// Shorten a commit id for log lines
pub fn short_sha(sha: &str) -> &str {
    if sha.len() > 7 {
        &sha[..7]
    } else {
        sha
    }
}
