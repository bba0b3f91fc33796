//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use strata_core::application::ports::Reporter;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// An explicit `--output-format` wins over `output.format` from the config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };

        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// `  label: value` with the label dimmed.
    pub fn field(&self, label: &str, value: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let label = format!("{label}:");
        let line = if self.no_color {
            format!("  {label:<18} {value}")
        } else {
            format!("  {:<18} {value}", label.dimmed())
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout.  Written even in quiet mode; JSON was asked for.
    pub fn json<T: Serialize>(&self, value: &T) -> CliResult<()> {
        let text = serde_json::to_string_pretty(value).map_err(|e| CliError::Serialization {
            message: e.to_string(),
        })?;
        self.term.write_line(&text)?;
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    pub fn is_json(&self) -> bool {
        self.format() == OutputFormat::Json
    }

    /// A [`Reporter`] that prints engine progress in this manager's style.
    ///
    /// With JSON output the lines move to stderr so stdout stays parseable.
    pub fn reporter(&self) -> ConsoleReporter {
        ConsoleReporter {
            quiet: self.quiet,
            no_color: self.no_color,
            to_stderr: self.is_json(),
        }
    }
}

// ── Reporter ──────────────────────────────────────────────────────────────────

/// Prints engine progress lines to the terminal.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    quiet: bool,
    no_color: bool,
    to_stderr: bool,
}

impl ConsoleReporter {
    fn term(&self) -> Term {
        if self.to_stderr {
            Term::stderr()
        } else {
            Term::stdout()
        }
    }
}

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let line = if self.no_color {
            format!("  {message}")
        } else {
            format!("  {}", message.dimmed())
        };
        // Progress output is best effort.
        let _ = self.term().write_line(&line);
    }

    /// Warnings survive `--quiet`; they describe files left untouched.
    fn warn(&self, message: &str) {
        let line = if self.no_color {
            format!("\u{26a0} {message}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), message.yellow())
        };
        let _ = Term::stderr().write_line(&line);
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
