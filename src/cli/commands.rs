//! CLI command implementations
//!
//! `serve` builds the pool lazily and runs the HTTP server until Ctrl-C.
//! `ping` opens one connection, runs `SELECT 1`, and exits.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::{DatabaseConfig, DbPool};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event_with_fields, Event, Logger};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Configuration file structure. Every field has a default, so `{}` is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Connection pool settings
    #[serde(default)]
    pub database: DatabaseConfig,
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

    /// Load from `path` when given, otherwise use defaults
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        let (config, source) = match path {
            Some(path) => (Self::load(path)?, path.display().to_string()),
            None => (Self::default(), "defaults".to_string()),
        };

        log_event_with_fields(Event::ConfigLoaded, &[("source", source.as_str())]);
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database.max_connections == 0 {
            return Err(CliError::config_error("database.max_connections must be > 0"));
        }

        if self.database.url.is_none() && self.database.password_env.trim().is_empty() {
            return Err(CliError::config_error(
                "database.password_env must name an environment variable",
            ));
        }

        Ok(())
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    // A missing .env is normal; variables may come from the real environment.
    let _ = dotenvy::dotenv();

    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Ping { config } => ping(config.as_deref()),
    }
}

/// Start the HTTP server
///
/// 1. Resolve configuration, apply the port override
/// 2. Build the pool (no connection is opened yet)
/// 3. Serve until Ctrl-C, then close the pool
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::resolve(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    if config.database.url.is_none() && config.database.password().is_none() {
        Logger::warn(
            "PASSWORD_ENV_UNSET",
            &[("variable", config.database.password_env.as_str())],
        );
    }

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async move {
        let pool = DbPool::connect_lazy(&config.database)?;
        let max_connections = config.database.max_connections.to_string();
        let target = config.database.redacted_target();
        log_event_with_fields(
            Event::PoolConfigured,
            &[
                ("max_connections", max_connections.as_str()),
                ("target", target.as_str()),
            ],
        );

        HttpServer::with_config(config.http, pool)
            .start()
            .await
            .map_err(|e| {
                let message = format!("HTTP server failed: {}", e);
                log_event_with_fields(Event::BootFailed, &[("error", message.as_str())]);
                CliError::boot_failed(message)
            })
    })
}

/// Check that the database is reachable
pub fn ping(config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::resolve(config_path)?;
    let target = config.database.redacted_target();

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    let result = rt.block_on(async {
        let pool = DbPool::connect(&config.database).await?;
        let outcome = pool.ping().await;
        pool.close().await;
        outcome
    });

    match result {
        Ok(()) => {
            log_event_with_fields(Event::PoolReachable, &[("target", target.as_str())]);
            write_response(json!({ "target": target }))
        }
        Err(e) => {
            let err = CliError::from(e);
            write_error(err.code_str(), err.message())?;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use tempfile::TempDir;

    fn write_config(temp_dir: &TempDir, value: serde_json::Value) -> std::path::PathBuf {
        let config_path = temp_dir.path().join("employee-api.json");
        fs::write(&config_path, value.to_string()).unwrap();
        config_path
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, json!({}));

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.database.database, "companydb");
    }

    #[test]
    fn test_nested_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(
            &temp_dir,
            json!({
                "http": { "port": 8081 },
                "database": { "host": "db", "password_env": "DB_PASSWORD" }
            }),
        );

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.http.port, 8081);
        assert_eq!(config.database.host, "db");
        assert_eq!(config.database.password_env, "DB_PASSWORD");
        assert_eq!(config.database.user, "root");
    }

    #[test]
    fn test_config_rejects_zero_connections() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, json!({ "database": { "max_connections": 0 } }));

        let err = Config::load(&config_path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load(&temp_dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("employee-api.json");
        fs::write(&config_path, "{ not json").unwrap();

        let err = Config::load(&config_path).unwrap_err();
        assert!(err.message().contains("Invalid config JSON"));
    }

    #[test]
    fn test_resolve_without_path_is_default() {
        assert_eq!(Config::resolve(None).unwrap(), Config::default());
    }

    #[test]
    fn test_ping_memory_database() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(
            &temp_dir,
            json!({ "database": { "url": "sqlite::memory:", "max_connections": 1 } }),
        );

        ping(Some(&config_path)).unwrap();
    }
}
