/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Station(#[from] station_core::StationError),

    #[error("Import error: {0}")]
    Import(#[from] station_importer::ImportError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<station_storage::StorageError> for CliError {
    fn from(err: station_storage::StorageError) -> Self {
        CliError::Station(err.into())
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
