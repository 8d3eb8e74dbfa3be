//! CLI argument definitions using clap
//!
//! Commands:
//! - employee-api serve [--config <path>] [--port <port>]
//! - employee-api ping [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// employee-api - HTTP CRUD over the employee table
#[derive(Parser, Debug)]
#[command(name = "employee-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Check that the database is reachable and exit
    Ping {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
