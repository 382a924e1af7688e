use std::sync::Arc;

use tracing::{info, warn};

use crate::storage::{SharedStorage, StorageError};

/// Storage key of the cross-process "stop trying auto-login" marker.
pub const AUTO_LOGIN_DISABLED_KEY: &str = "AUTO_LOGIN_DISABLED";
const DISABLED_VALUE: &str = "1";

/// The persisted auto-login opt-out shared by every process of the origin.
///
/// Absent means not disabled. Once set it stays set until `clear` runs.
#[derive(Clone)]
pub struct DisabledFlag {
    storage: Arc<dyn SharedStorage>,
}

impl DisabledFlag {
    pub fn new(storage: Arc<dyn SharedStorage>) -> Self {
        Self { storage }
    }

    /// Reads the flag. An unreadable storage counts as "not disabled".
    pub fn is_disabled(&self) -> bool {
        match self.storage.get(AUTO_LOGIN_DISABLED_KEY) {
            Ok(value) => value.as_deref() == Some(DISABLED_VALUE),
            Err(e) => {
                warn!("Could not read {}: {}", AUTO_LOGIN_DISABLED_KEY, e);
                false
            }
        }
    }

    pub fn disable(&self) -> Result<(), StorageError> {
        self.storage.set(AUTO_LOGIN_DISABLED_KEY, DISABLED_VALUE)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(AUTO_LOGIN_DISABLED_KEY)?;
        info!("Auto-login disabled flag cleared");
        Ok(())
    }
}
