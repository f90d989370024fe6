/// Station configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use station_importer::{FileStrategy, ImportConfig};
use station_playlist::{EngineConfig, UnknownDurationPolicy};
use station_storage::PoolSettings;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "station.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StationConfig {
    pub storage: StorageSettings,
    pub import: ImportConfig,
    pub playlist: EngineConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub busy_timeout_secs: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let pool = PoolSettings::default();
        Self {
            database_url: "sqlite://station.db".to_string(),
            max_connections: pool.max_connections,
            acquire_timeout_secs: pool.acquire_timeout.as_secs(),
            busy_timeout_secs: pool.busy_timeout.as_secs(),
        }
    }
}

impl StorageSettings {
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
            busy_timeout: Duration::from_secs(self.busy_timeout_secs),
        }
    }
}

impl StationConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `station.toml` is read if
    /// present. `STATION_*` variables override the file, with `__` between
    /// section and key (`STATION_STORAGE__DATABASE_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        let config: Self = settings.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.trim().is_empty() {
            return Err(CliError::Config(
                "storage.database_url is required (set STATION_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if self.storage.max_connections == 0 {
            return Err(CliError::Config(
                "storage.max_connections must be at least 1".to_string(),
            ));
        }

        if self.playlist.max_attempts == 0 {
            return Err(CliError::Config(
                "playlist.max_attempts must be at least 1".to_string(),
            ));
        }

        if let UnknownDurationPolicy::Estimate { seconds: 0 } = self.playlist.unknown_duration {
            return Err(CliError::Config(
                "playlist.unknown_duration estimate must be positive (use mode = \"free\" for zero)"
                    .to_string(),
            ));
        }

        if self.import.file_strategy != FileStrategy::Reference
            && self.import.library_path.as_os_str().is_empty()
        {
            return Err(CliError::Config(format!(
                "import.library_path is required with the {:?} strategy",
                self.import.file_strategy
            )));
        }

        Ok(())
    }
}

/// `STATION_*` environment variables
pub fn environment() -> config::Environment {
    config::Environment::with_prefix("STATION")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
