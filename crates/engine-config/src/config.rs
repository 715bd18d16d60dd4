use crate::error::ConfigError;
use model::execution::task::TransferTask;
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

/// Named destination connection profile, resolvable from a task's
/// `destination_server_key`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DestinationProfile {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u32,
}

impl DestinationProfile {
    /// Keyword/value connection string in the form the Postgres client
    /// parses.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={} sslmode={} connect_timeout={}",
            self.host,
            self.port,
            self.database,
            self.username,
            self.password,
            self.ssl_mode,
            self.connect_timeout_secs
        )
    }
}

fn default_port() -> u16 {
    5432
}

fn default_ssl_mode() -> String {
    "prefer".to_string()
}

fn default_connect_timeout() -> u32 {
    10
}

fn default_batch_size() -> usize {
    1000
}

/// Destination connection picked for one task.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationChoice {
    pub connection_string: String,
    /// Profile key actually used, when a named profile resolved.
    pub profile: Option<String>,
    /// True when the task named a profile that does not exist and the
    /// default connection was used instead.
    pub fell_back: bool,
}

/// Static input for one run: the task list, connection settings, and the
/// batch size. Loaded once, read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    #[serde(default)]
    pub use_mock_source: bool,
    #[serde(default)]
    pub source_connection_string: String,
    pub destination_connection_string: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub destination_servers: HashMap<String, DestinationProfile>,
    #[serde(default)]
    pub tasks: Vec<TransferTask>,
}

impl RunConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = serde_json::from_str(source)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid(
                "batch_size must be at least 1".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for task in &self.tasks {
            if task.name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "every task needs a non-empty name".to_string(),
                ));
            }
            if task.destination_table.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "task '{}' has no destination table",
                    task.name
                )));
            }
            if !seen.insert(task.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate task name '{}'",
                    task.name
                )));
            }
        }
        Ok(())
    }

    /// Resolve the destination connection for a task. A named profile wins
    /// when it exists; a missing profile falls back to the default
    /// connection (reported through `fell_back`, never an error).
    pub fn resolve_destination(&self, server_key: Option<&str>) -> DestinationChoice {
        match server_key {
            None => DestinationChoice {
                connection_string: self.destination_connection_string.clone(),
                profile: None,
                fell_back: false,
            },
            Some(key) => match self.destination_servers.get(key) {
                Some(profile) => DestinationChoice {
                    connection_string: profile.connection_string(),
                    profile: Some(key.to_string()),
                    fell_back: false,
                },
                None => DestinationChoice {
                    connection_string: self.destination_connection_string.clone(),
                    profile: None,
                    fell_back: true,
                },
            },
        }
    }
}
