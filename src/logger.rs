//! Logging utilities with colored output.
//!
//! This module provides the `log!` macro for formatted terminal output with
//! colored, bracketed module prefixes.
//!
//! # Example
//!
//! ```ignore
//! log!("serve"; "http://{}", addr);
//! log!("content"; "`{}` has malformed front matter", path);
//! ```

use colored::{ColoredString, Colorize};
use std::io::{Write, stderr, stdout};

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Write a log line: `HH:MM:SS [module] message`.
///
/// Messages from the `error` module go to stderr, everything else to stdout.
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let line = format_line(&now(), &colorize_prefix(module, &module_lower), message);

    if module_lower == "error" {
        let mut stderr = stderr().lock();
        writeln!(stderr, "{line}").ok();
        stderr.flush().ok();
    } else {
        let mut stdout = stdout().lock();
        writeln!(stdout, "{line}").ok();
        stdout.flush().ok();
    }
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "serve" => prefix.bright_blue().bold(),
        "watch" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        "content" | "i18n" => prefix.bright_magenta().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

fn format_line(timestamp: &str, prefix: &ColoredString, message: &str) -> String {
    format!("{} {prefix} {message}", timestamp.dimmed())
}

/// Get current local time formatted as HH:MM:SS
fn now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

// ============================================================================
// Tests
// ============================================================================
