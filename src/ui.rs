//! Terminal output
//!
//! The changelog goes to stdout untouched so it can be piped or redirected;
//! diagnostics go to stderr.

use console::style;

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Error line for a failed run
///
/// Only the outermost message is printed: errors wrapping a cause already
/// include it in their own message.
pub fn format_failure(err: &anyhow::Error) -> String {
    format_error(&err.to_string())
}

pub fn display_failure(err: &anyhow::Error) {
    eprintln!("{}", format_failure(err));
}

/// Print the rendered changelog without extra decoration
pub fn display_changelog(changelog: &str) {
    print!("{}", changelog);
}
