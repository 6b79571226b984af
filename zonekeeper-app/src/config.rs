//! TOML application configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use zonekeeper_core::{CoreError, CoreResult};

fn default_database_path() -> PathBuf {
    PathBuf::from("zonekeeper.db")
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_session_timeout_secs() -> u64 {
    600
}

/// Application configuration, deserialized from TOML. Every field has
/// a default so an empty file is a valid config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// SQLite database file. Parent directories are created on startup.
    pub database_path: PathBuf,
    /// Per-request timeout for provider API calls, in seconds.
    pub request_timeout_secs: u64,
    /// Retry bound for transient provider failures.
    pub max_retries: u32,
    /// Onboarding session inactivity window, in seconds.
    pub session_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
            session_timeout_secs: default_session_timeout_secs(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> CoreResult<Self> {
        toml::from_str(raw).map_err(|e| CoreError::Serialization(format!("invalid config: {e}")))
    }

    /// Read and parse a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> CoreResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CoreError::Storage(format!(
                "failed to read config {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.session_timeout_secs, 600);
        assert_eq!(config.database_path, PathBuf::from("zonekeeper.db"));
    }

    #[test]
    fn partial_config_overrides_some_fields() {
        let config = AppConfig::from_toml_str(
            r#"
database_path = "/var/lib/zonekeeper/data.db"
max_retries = 5
"#,
        )
        .unwrap();
        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/zonekeeper/data.db")
        );
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AppConfig::from_toml_str("databse_path = \"typo.db\"").is_err());
    }
}
