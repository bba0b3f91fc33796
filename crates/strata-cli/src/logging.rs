//! Tracing subscriber initialisation.
//!
//! Only the CLI crate is allowed to call [`init_logging`]; `strata-core` and
//! `strata-adapters` only *emit* spans and events, they never touch
//! subscribers.
//!
//! # Verbosity mapping
//!
//! The service layer logs one event per provisioning step, upgrade step and
//! removed folder at INFO. The adapters log every file and folder they touch
//! at DEBUG, so they only open up from `-vv` on.
//!
//! | Flag(s)   | Service layer | Adapters |
//! |-----------|---------------|----------|
//! | `--quiet` | ERROR         | ERROR    |
//! | (none)    | WARN          | WARN     |
//! | `-v`      | INFO          | WARN     |
//! | `-vv`     | DEBUG         | DEBUG    |
//! | `-vvv`    | TRACE         | TRACE    |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// How much of the engine's trail reaches stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    Normal,
    Steps,
    Files,
    Trace,
}

impl Verbosity {
    fn from_args(args: &GlobalArgs) -> Self {
        if args.quiet {
            return Self::Quiet;
        }
        match args.verbose {
            0 => Self::Normal,
            1 => Self::Steps,
            2 => Self::Files,
            _ => Self::Trace,
        }
    }

    /// Level for the binary and the service layer.
    fn engine_level(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Steps => "info",
            Self::Files => "debug",
            Self::Trace => "trace",
        }
    }

    /// Level for the adapters, whose events are per file.
    fn adapter_level(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal | Self::Steps => "warn",
            Self::Files => "debug",
            Self::Trace => "trace",
        }
    }

    fn directives(self) -> String {
        let engine = self.engine_level();
        format!(
            "strata={engine},strata_core={engine},strata_adapters={}",
            self.adapter_level()
        )
    }
}

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let verbosity = Verbosity::from_args(args);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()));

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    // Targets appear once per-file events are enabled.
    let show_target = matches!(verbosity, Verbosity::Files | Verbosity::Trace);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(show_target)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}
