//! # Structured Logging
//!
//! Sets up the `tracing` subscriber for the node binary. The format is
//! picked on the command line (`--log-format`), filtering comes from
//! `RUST_LOG` with a per-command default, and everything goes to stderr
//! so stdout stays clean for `init`'s summary output.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format, parsed straight off the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable output with source locations. For local development.
    Pretty,
    /// JSON lines for log aggregation.
    Json,
}

/// Install the global tracing subscriber.
///
/// Call once, early in `main()`; a second call panics. `default_level`
/// applies when `RUST_LOG` is unset and follows `EnvFilter` directive
/// syntax, e.g. `"astra_node=debug,astra_ledger=info"`.
pub fn init_logging(default_level: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init(),
    }

    tracing::debug!(?format, "logging initialized");
}
