//! Colored terminal logging.
//!
//! A small logging sink handed to each component at construction. Writing
//! through an explicit value instead of a process-global macro keeps the
//! pipeline free of module-level mutable state; the host can still route
//! everything to one terminal because `Logger` is `Copy`.
//!
//! # Example
//!
//! ```ignore
//! let log = Logger::new("quarto");
//! log.info("render completed");
//! log.error("render failed: exit status 1");
//! ```

use colored::{ColoredString, Colorize};
use std::io::{Write, stdout};

/// Logging sink with a colored `[module]` prefix.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    module: &'static str,
}

impl Logger {
    pub const fn new(module: &'static str) -> Self {
        Self { module }
    }

    /// Log an informational message.
    pub fn info(&self, message: &str) {
        emit(prefix(self.module, false), message);
    }

    /// Log an error message.
    pub fn error(&self, message: &str) {
        emit(prefix(self.module, true), message);
    }
}

/// Write one `[module] message` line.
fn emit(prefix: ColoredString, message: &str) {
    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix; errors are always red.
fn prefix(module: &str, is_error: bool) -> ColoredString {
    let prefix = format!("[{module}]");
    if is_error {
        prefix.bright_red().bold()
    } else {
        prefix.bright_yellow().bold()
    }
}
