use serde::{Deserialize, Serialize};

/// One configured unit of work: a source query, a destination table, an
/// optional transform flag, and an optional named destination server.
/// Loaded from configuration and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferTask {
    pub name: String,
    pub source_query: String,
    pub destination_table: String,
    #[serde(default)]
    pub destination_server_key: Option<String>,
    #[serde(default)]
    pub enable_transform: bool,
}

impl TransferTask {
    pub fn new(name: &str, source_query: &str, destination_table: &str) -> Self {
        TransferTask {
            name: name.to_string(),
            source_query: source_query.to_string(),
            destination_table: destination_table.to_string(),
            destination_server_key: None,
            enable_transform: false,
        }
    }
}
