use connectors::error::SourceError;
use engine_config::error::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialize the source connector: {0}")]
    Source(#[from] SourceError),

    #[error("failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),
}
