use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the shared, persisted key/value storage lives.
/// We differentiate the backends via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
#[serde(tag = "type")]
pub enum StorageConfig {
    /// Process-local map. Handles cloned from the same storage share state.
    #[default]
    #[serde(rename = "memory")]
    Memory,
    /// A JSON document on disk, visible to every process pointing at the same path.
    #[serde(rename = "file")]
    File(FileStorageConfig),
}

#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct FileStorageConfig {
    pub path: PathBuf,
}
