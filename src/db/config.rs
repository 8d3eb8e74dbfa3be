//! Database Configuration
//!
//! Connection settings for the pool. Everything except the password is a
//! plain config value; the password is read from an environment variable
//! when the pool is built.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::any::AnyConnectOptions;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::ConnectOptions;

use super::errors::{DbError, DbResult};

/// Pool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host (default: "localhost")
    #[serde(default = "default_host")]
    pub host: String,

    /// Database port (default: 3306)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database user (default: "root")
    #[serde(default = "default_user")]
    pub user: String,

    /// Database name (default: "companydb")
    #[serde(default = "default_database")]
    pub database: String,

    /// Environment variable holding the password (default: "PASS")
    #[serde(default = "default_password_env")]
    pub password_env: String,

    /// Upper bound on open connections (default: 10)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a free connection (default: 10)
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// Full connection URL; when set, host/port/user/database/password are ignored
    #[serde(default)]
    pub url: Option<String>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_user() -> String {
    "root".to_string()
}

fn default_database() -> String {
    "companydb".to_string()
}

fn default_password_env() -> String {
    "PASS".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            database: default_database(),
            password_env: default_password_env(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            url: None,
        }
    }
}

impl DatabaseConfig {
    /// Config pointing at an explicit URL (e.g. `sqlite::memory:`)
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Password from the configured environment variable, if set
    pub fn password(&self) -> Option<String> {
        std::env::var(&self.password_env).ok()
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Connection target without credentials, safe to log
    pub fn redacted_target(&self) -> String {
        match &self.url {
            Some(url) => match url.split_once('@') {
                Some((scheme_and_user, host)) => {
                    let scheme = scheme_and_user.split("://").next().unwrap_or("");
                    format!("{}://***@{}", scheme, host)
                }
                None => url.clone(),
            },
            None => format!(
                "mysql://{}@{}:{}/{}",
                self.user, self.host, self.port, self.database
            ),
        }
    }

    /// Build driver-agnostic connect options
    pub fn connect_options(&self) -> DbResult<AnyConnectOptions> {
        if let Some(url) = &self.url {
            return AnyConnectOptions::from_str(url).map_err(|e| DbError::Config(e.to_string()));
        }

        let mut mysql = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        if let Some(password) = self.password() {
            mysql = mysql.password(&password);
        }

        AnyConnectOptions::from_url(&mysql.to_url_lossy())
            .map_err(|e| DbError::Config(e.to_string()))
    }
}
