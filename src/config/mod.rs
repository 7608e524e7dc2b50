//! Configuration loading and management
//!
//! Settings come from an optional YAML file (path in `RESTAURANT_CONFIG`),
//! then environment variables override individual values:
//!
//! | Variable | Setting |
//! |---|---|
//! | `MONGODB_URI` | `database.uri` |
//! | `MONGODB_DATABASE` | `database.name` |
//! | `HOST` | `server.host` |
//! | `PORT` | `server.port` |
//! | `OPERATION_TIMEOUT_SECS` | `operation_timeout_secs` |
//! | `RUST_LOG` | `log_filter` |

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable holding the path of the YAML configuration file
pub const CONFIG_PATH_VAR: &str = "RESTAURANT_CONFIG";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// MongoDB connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection string
    pub uri: String,

    /// Database holding the restaurant collections
    pub name: String,

    /// Deadline for connecting and selecting a server
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            name: "restaurant".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,

    /// Deadline applied to every store operation
    pub operation_timeout_secs: u64,

    /// `tracing_subscriber::EnvFilter` directives
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            operation_timeout_secs: 100,
            log_filter: "info,tower_http=debug".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        Self::from_yaml_str(&content).with_context(|| format!("invalid config file {path}"))
    }

    /// Load configuration from a YAML string
    ///
    /// Missing keys take their default value.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration from the file named by `RESTAURANT_CONFIG` (if
    /// any) and the process environment
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override settings with the variables `lookup` knows about
    ///
    /// A value that does not parse is an error.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        override_with(&lookup, "MONGODB_URI", &mut self.database.uri)?;
        override_with(&lookup, "MONGODB_DATABASE", &mut self.database.name)?;
        override_with(&lookup, "HOST", &mut self.server.host)?;
        override_with(&lookup, "PORT", &mut self.server.port)?;
        override_with(&lookup, "OPERATION_TIMEOUT_SECS", &mut self.operation_timeout_secs)?;
        override_with(&lookup, "RUST_LOG", &mut self.log_filter)?;
        Ok(())
    }

    /// Deadline applied to every store operation
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }

    /// Listener address, `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn override_with<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, target: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(());
    };
    *target = raw
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid {key} value '{raw}': {e}"))?;
    Ok(())
}
