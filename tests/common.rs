#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sessionboot::config::{load_config_from_str, ConfigV1};
use sessionboot::startup::build_context;
use sessionboot::state::SessionContext;

/// A config pointing at `base_url` with file-backed storage at `storage_path`.
pub fn test_config(base_url: &str, auto_login: bool, storage_path: &Path) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
logging:
  level: "debug"
  format: "json"
api:
  base_url: "{base_url}"
  timeout_in_ms: 3000
auto_login:
  enabled: {auto_login}
identity_cache:
  ttl_seconds: 60
storage:
  type: file
  path: "{path}"
"#,
        base_url = base_url,
        auto_login = auto_login,
        path = storage_path.display(),
    );
    load_config_from_str(&yaml).expect("Failed to parse test config YAML")
}

/// Build a context the way the binary does. Each call models a separate process.
pub fn build_app(config: ConfigV1) -> SessionContext {
    build_context(Arc::new(config)).expect("context should build")
}

/// A unique storage file under the system temp dir, removed on drop.
pub struct TempStorage {
    pub path: PathBuf,
}

impl TempStorage {
    pub fn new() -> Self {
        Self {
            path: std::env::temp_dir().join(format!(
                "sessionboot-it-{}.json",
                uuid::Uuid::new_v4()
            )),
        }
    }
}

impl Drop for TempStorage {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
