//! Logging utilities with colored output.
//!
//! Provides the `log!` macro for formatted terminal output with colored
//! `[module]` prefixes, plus small helpers for status lines (✓ / ⚠ / ✗)
//! and remediation hints.

use colored::{ColoredString, Colorize};

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("deploy"; "publishing {} to {}", dir, branch);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix.
pub fn log(module: &str, message: &str) {
    println!("{} {message}", colorize_prefix(module));
}

/// Success line (✓ prefix, green).
pub fn success(message: &str) {
    println!("{} {message}", "✓".green());
}

/// Warning line (⚠ prefix, yellow). Non-fatal conditions only.
pub fn warn(message: &str) {
    println!("{} {message}", "⚠".yellow());
}

/// Error line (✗ prefix, red), written to stderr.
pub fn error(message: &str) {
    eprintln!("{} {message}", "✗".red());
}

/// Indented remediation hint, e.g. the exact command to run manually.
pub fn hint(message: &str) {
    println!("  {}", message.cyan());
}

/// Indented dimmed detail line.
pub fn detail(message: &str) {
    println!("  {}", message.dimmed());
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module {
        "deploy" => prefix.bright_blue().bold(),
        "init" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}
