//! CLI module for employee-api
//!
//! Provides command-line interface for:
//! - serve: Build the pool and run the HTTP server
//! - ping: One-shot database reachability check

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{ping, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
