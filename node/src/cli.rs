//! # CLI Interface
//!
//! Defines the command-line argument structure for `astra-node` using
//! `clap` derive. Two subcommands: `run` and `version`. There is no
//! `init` — the ledger is volatile and seeds its own genesis block at
//! startup, so there is nothing on disk to initialize.

use clap::{Parser, Subcommand};

use astra_ledger::config::{DEFAULT_METRICS_PORT, DEFAULT_RPC_PORT};

/// ASTRA star-registry ledger node.
///
/// Serves a single authoritative in-memory ledger over REST: challenge
/// issuance, star registration, block lookup, and chain validation.
/// State lives for the lifetime of the process — by design.
#[derive(Parser, Debug)]
#[command(
    name = "astra-node",
    about = "ASTRA star-registry ledger node",
    version,
    propagate_version = true
)]
pub struct AstraNodeCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the ASTRA node binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the ledger node.
    Run(RunArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Port for the REST API.
    #[arg(long, env = "ASTRA_RPC_PORT", default_value_t = DEFAULT_RPC_PORT)]
    pub rpc_port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "ASTRA_METRICS_PORT", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "ASTRA_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,
}
