// User-facing output for rucop: diagnostic listings, summaries, and the
// short status notices the original status bar would have shown.
use std::io::{self, IsTerminal};
use std::path::Path;

use crate::diagnostics::{Diagnostic, FileAnnotations};

/// Simple output configuration for user-facing display. Verbosity is a
/// logging concern and lives in `LogConfig`.
#[derive(Debug, Clone)]
pub struct UserOutputConfig {
    pub quiet: bool,
    pub use_colors: bool,
}

impl UserOutputConfig {
    pub fn new(quiet: bool, color: Option<String>) -> Self {
        let use_colors = match color.as_deref() {
            Some("always") => true,
            Some("never") => false,
            Some("auto") | None => {
                io::stdout().is_terminal()
                    && std::env::var("TERM").map_or(true, |term| term != "dumb")
                    && std::env::var("NO_COLOR").is_err()
            }
            _ => false,
        };

        Self { quiet, use_colors }
    }
}

/// Simple color constants
#[derive(Clone, Debug)]
pub struct Colors {
    pub green: &'static str,
    pub red: &'static str,
    pub yellow: &'static str,
    pub reset: &'static str,
}

impl Colors {
    pub fn new(use_colors: bool) -> Self {
        if use_colors {
            Self {
                green: "\x1b[32m",
                red: "\x1b[31m",
                yellow: "\x1b[33m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                green: "",
                red: "",
                yellow: "",
                reset: "",
            }
        }
    }
}

/// User-friendly output formatter
#[derive(Clone, Debug)]
pub struct UserOutput {
    config: UserOutputConfig,
    colors: Colors,
}

impl UserOutput {
    pub fn new(config: UserOutputConfig) -> Self {
        let colors = Colors::new(config.use_colors);
        Self { config, colors }
    }

    /// Print one file's annotations, 1-based for human consumption.
    pub fn show_annotations(&self, path: &Path, annotations: &FileAnnotations) {
        if self.config.quiet {
            return;
        }

        for (line, message) in annotations.iter() {
            println!("{}:{}: {}", path.display(), line + 1, message);
        }

        if annotations.is_empty() {
            println!(
                "{}{}: no offenses{}",
                self.colors.green,
                path.display(),
                self.colors.reset
            );
        } else {
            println!(
                "{}{}: {} offense{}{}",
                self.colors.red,
                path.display(),
                annotations.len(),
                if annotations.len() == 1 { "" } else { "s" },
                self.colors.reset
            );
        }
    }

    /// Print diagnostics from a multi-target check.
    pub fn show_diagnostics(&self, diagnostics: &[Diagnostic]) {
        if self.config.quiet {
            return;
        }

        for diagnostic in diagnostics {
            println!(
                "{}:{}: {}: {}",
                diagnostic.path,
                diagnostic.line + 1,
                diagnostic.severity,
                diagnostic.message
            );
        }

        if diagnostics.is_empty() {
            println!("{}No offenses found{}", self.colors.green, self.colors.reset);
        } else {
            println!(
                "{}{} offense{} found{}",
                self.colors.red,
                diagnostics.len(),
                if diagnostics.len() == 1 { "" } else { "s" },
                self.colors.reset
            );
        }
    }

    /// Show simple status message
    pub fn show_status(&self, message: &str) {
        if !self.config.quiet {
            println!("{message}");
        }
    }

    /// Show error message
    pub fn show_error(&self, message: &str) {
        eprintln!("{}Error: {}{}", self.colors.red, message, self.colors.reset);
    }

    /// Show warning message
    pub fn show_warning(&self, message: &str) {
        if !self.config.quiet {
            eprintln!(
                "{}Warning: {}{}",
                self.colors.yellow, message, self.colors.reset
            );
        }
    }
}
