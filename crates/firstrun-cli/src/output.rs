//! Output formatting

use crate::error::CliResult;
use console::{style, Term};
use serde::Serialize;

/// Writes command results to stdout.
///
/// Data lines always print. Notes are decoration and disappear in quiet mode.
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl Reporter {
    /// Create a reporter writing to stdout
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    /// Print a raw data line
    pub fn line(&self, text: &str) -> CliResult<()> {
        self.term.write_line(text)?;
        Ok(())
    }

    /// Print a `name: value` pair
    pub fn field(&self, name: &str, value: impl std::fmt::Display) -> CliResult<()> {
        self.line(&format_field(name, &value.to_string(), self.use_color))
    }

    /// Print an informational note
    pub fn note(&self, message: &str) -> CliResult<()> {
        if self.quiet {
            return Ok(());
        }
        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };
        self.line(&format!("{prefix} {message}"))
    }

    /// Print a value as pretty JSON
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> CliResult<()> {
        self.line(&serde_json::to_string_pretty(value)?)
    }
}

/// Render a `name: value` pair, bolding the name when colored
#[must_use]
pub fn format_field(name: &str, value: &str, use_color: bool) -> String {
    if use_color {
        format!("{}: {value}", style(name).bold())
    } else {
        format!("{name}: {value}")
    }
}
