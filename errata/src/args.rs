use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Error response catalog
#[derive(Debug, Parser)]
#[command(name = "errata", about = "Translate application errors into JSON HTTP responses")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "errata.toml", env = "ERRATA_CONFIG", global = true)]
    pub config: PathBuf,

    /// Log filter directive
    #[arg(long, default_value = "info", env = "ERRATA_LOG", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the configured errors for inspection over HTTP
    Serve {
        /// Override the listen address
        #[arg(long, env = "ERRATA_LISTEN")]
        listen: Option<SocketAddr>,
    },
    /// Build the error registry and print every rendered response
    Check,
}
