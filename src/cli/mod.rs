//! CLI module for itemdb
//!
//! Provides command-line interface for:
//! - init: Create the database and the items table
//! - serve: Run the HTTP API

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, StoreArgs};
pub use commands::{init, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
