//! CLI command implementations
//!
//! `init` runs the idempotent table-create script. `serve` builds the chain
//! store → controller → HTTP server once at startup and runs it until Ctrl-C.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::controller::ItemController;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::storage::ItemService;

use super::args::{Command, StoreArgs};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (default: ./db/database.sqlite)
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// HTTP listener settings
    #[serde(default)]
    pub server: HttpServerConfig,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./db/database.sqlite")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            server: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Config file (when given) with command-line overrides applied
    pub fn resolve(args: &StoreArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(db_path) = &args.db_path {
            config.db_path = db_path.clone();
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(CliError::config_error("db_path must not be empty"));
        }
        Ok(())
    }
}

/// Parse args and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    init_tracing();

    match cmd {
        Command::Init { store } => init(&Config::resolve(&store)?),
        Command::Serve { store, host, port } => {
            let mut config = Config::resolve(&store)?;
            config.server.override_listener(host, port);
            serve(config)
        }
    }
}

/// Logs go to stderr so stdout stays reserved for command output
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Create the database file and the `items` table if missing
pub fn init(config: &Config) -> CliResult<()> {
    ItemService::open(&config.db_path)?;
    info!(db_path = %config.db_path.display(), "items table ready");

    write_response(json!({
        "initialized": true,
        "db_path": config.db_path.display().to_string(),
    }))
}

/// Start the HTTP API
pub fn serve(config: Config) -> CliResult<()> {
    let service = ItemService::open(&config.db_path)?;
    info!(db_path = %config.db_path.display(), "database opened");

    let server = HttpServer::new(config.server, ItemController::new(service));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}
