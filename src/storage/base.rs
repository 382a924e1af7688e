use std::sync::Arc;

use tracing::info;

use super::{file_storage::FileStorage, memory_storage::MemoryStorage};
use crate::config::StorageConfig;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key/value storage shared by every process of the same origin.
///
/// A write must be visible to a fresh `get` from any other handle onto the
/// same backing medium.
pub trait SharedStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Creates a concrete storage implementation based on the StorageConfig.
pub fn create_storage(config: &StorageConfig) -> Arc<dyn SharedStorage> {
    match config {
        StorageConfig::Memory => {
            info!("Using in-memory shared storage.");
            Arc::new(MemoryStorage::new())
        }
        StorageConfig::File(file) => {
            info!("Using file-backed shared storage at {}", file.path.display());
            Arc::new(FileStorage::new(&file.path))
        }
    }
}
