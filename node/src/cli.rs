//! # CLI Interface
//!
//! Defines the command-line argument structure for `astra-node` using
//! `clap` derive. Supports three subcommands: `run`, `init`, and
//! `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Astra star notary node.
///
/// A single-node notary service backed by a hash-linked, append-only
/// ledger. Issues identity challenges, records star ownership claims as
/// blocks, and serves the registry over a REST API.
#[derive(Parser, Debug)]
#[command(
    name = "astra-node",
    about = "Astra star notary node",
    version,
    propagate_version = true
)]
pub struct AstraNodeCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the Astra node binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the notary node.
    Run(RunArgs),
    /// Initialize a new node — creates the data directory and writes the
    /// genesis block.
    Init(InitArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the node data directory where the ledger is stored.
    ///
    /// Created on first run if it does not exist.
    #[arg(long, short = 'd', env = "ASTRA_DATA_DIR", default_value = "~/.astra")]
    pub data_dir: PathBuf,

    /// Port for the REST API.
    #[arg(long, env = "ASTRA_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Log output format.
    #[arg(long, env = "ASTRA_LOG_FORMAT", value_enum, default_value = "pretty")]
    pub log_format: LogFormat,
}

/// Arguments for the `init` subcommand.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Path to the data directory to initialize.
    #[arg(long, short = 'd', env = "ASTRA_DATA_DIR", default_value = "~/.astra")]
    pub data_dir: PathBuf,
}
