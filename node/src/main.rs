// Copyright (c) 2026 Astra Labs. MIT License.
// See LICENSE for details.

//! # Astra Star Notary Node
//!
//! Entry point for the `astra-node` binary. Parses CLI arguments,
//! initializes logging, opens the ledger, and serves the REST API.
//!
//! The binary supports three subcommands:
//!
//! - `run`     — start the notary node
//! - `init`    — initialize the data directory and write genesis
//! - `version` — print build version information

mod api;
mod cli;
mod logging;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;

use astra_ledger::ChainStore;

use cli::{AstraNodeCli, Commands};
use logging::LogFormat;
use session::SessionRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = AstraNodeCli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::Init(args) => init_node(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Starts the full notary node: ledger, session registry, and API server.
async fn run_node(args: cli::RunArgs) -> Result<()> {
    logging::init_logging(
        "astra_node=info,astra_ledger=info,tower_http=debug",
        args.log_format,
    );

    tracing::info!(
        port = args.port,
        data_dir = %args.data_dir.display(),
        "starting astra-node"
    );

    // --- Persistent storage ---
    let db_path = args.data_dir.join("db");
    std::fs::create_dir_all(&db_path)
        .with_context(|| format!("failed to create database directory: {}", db_path.display()))?;

    let chain = Arc::new(
        ChainStore::open(&db_path)
            .with_context(|| format!("failed to open ledger at {}", db_path.display()))?,
    );
    tracing::info!(path = %db_path.display(), "ledger opened");

    // --- Genesis ---
    if chain.bootstrap_if_empty().context("genesis bootstrap failed")? {
        tracing::info!("genesis block written");
    }
    let height = chain.height().context("height read failed")?;
    tracing::info!(height, "chain ready");

    // --- Application state ---
    let app_state = api::AppState {
        version: format!(
            "{} (protocol {})",
            env!("CARGO_PKG_VERSION"),
            astra_ledger::config::PROTOCOL_VERSION,
        ),
        chain,
        sessions: Arc::new(SessionRegistry::default()),
    };

    // --- API server ---
    let router = api::create_router(app_state);
    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind API listener on {}", addr))?;
    tracing::info!("API server listening on {}", addr);

    tokio::select! {
        res = axum::serve(listener, router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining connections");
        }
    }

    tracing::info!("astra-node stopped");
    Ok(())
}

/// Initializes a new node data directory and writes the genesis block.
fn init_node(args: cli::InitArgs) -> Result<()> {
    logging::init_logging("astra_node=info", LogFormat::Pretty);

    let data_dir = &args.data_dir;
    tracing::info!(data_dir = %data_dir.display(), "initializing node");

    let db_path = data_dir.join("db");
    std::fs::create_dir_all(&db_path)
        .with_context(|| format!("failed to create database directory: {}", db_path.display()))?;

    let chain = ChainStore::open(&db_path)
        .with_context(|| format!("failed to open ledger at {}", db_path.display()))?;
    let created = chain.bootstrap_if_empty().context("genesis bootstrap failed")?;
    let height = chain.height().context("height read failed")?;

    println!("Node initialized successfully.");
    println!("  Data directory : {}", data_dir.display());
    println!(
        "  Genesis        : {}",
        if created { "written" } else { "already present" }
    );
    println!("  Chain height   : {}", height);

    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("astra-node {}", env!("CARGO_PKG_VERSION"));
    println!("protocol   {}", astra_ledger::config::PROTOCOL_VERSION);
    println!("rustc      {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
