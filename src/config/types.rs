use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::storage::StorageConfig;

/// Environment variables with this prefix override file values,
/// e.g. `SESSIONBOOT_AUTO_LOGIN__ENABLED=true`.
pub const ENV_PREFIX: &str = "SESSIONBOOT_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    #[serde(default)]
    pub auto_login: AutoLoginConfig,
    #[serde(default)]
    pub identity_cache: IdentityCacheConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the backend lives and how the HTTP client talks to it.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    /// Base URL the fixed endpoint paths are appended to, e.g. `http://localhost:7860/api`.
    pub base_url: String,
    /// Per-request timeout enforced by the HTTP client. Unset means no timeout.
    pub timeout_in_ms: Option<u64>,
}

/// Feature toggle for the zero-interaction login attempt at boot.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct AutoLoginConfig {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct IdentityCacheConfig {
    /// How long a fetched profile is served from the cache.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

fn default_ttl_seconds() -> u64 {
    60
}

impl Default for IdentityCacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Load config from a YAML file, with `SESSIONBOOT_` environment overrides on top.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigV1, figment::Error> {
    extract(
        Figment::new()
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__")),
    )
}

/// Load config from an in-memory YAML document. No environment overrides apply.
pub fn load_config_from_str(yaml: &str) -> Result<ConfigV1, figment::Error> {
    extract(Figment::new().merge(Yaml::string(yaml)))
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
