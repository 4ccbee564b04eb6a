//! CLI argument definitions using clap
//!
//! Commands:
//! - itemdb init [--config <path>] [--db <path>]
//! - itemdb serve [--config <path>] [--db <path>] [--host <host>] [--port <port>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// itemdb - a small CRUD API over one SQLite table
#[derive(Parser, Debug)]
#[command(name = "itemdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// SQLite database file; overrides the config file
    #[arg(long = "db", env = "ITEMDB_DB_PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and the items table if missing
    Init {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Start the HTTP API
    Serve {
        #[command(flatten)]
        store: StoreArgs,

        /// Address to bind; overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on; overrides the config file
        #[arg(long, env = "ITEMDB_PORT")]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
