//! Wiring of storage, engine and importer for one CLI invocation

use crate::{Result, StationConfig};
use sqlx::SqlitePool;
use station_importer::LibraryImporter;
use station_playlist::PlaylistBudgetEngine;
use station_storage::LocalStorageContext;
use std::sync::Arc;

pub type Engine = PlaylistBudgetEngine<LocalStorageContext, LocalStorageContext>;

/// Everything a command needs
pub struct App {
    pub(crate) pool: SqlitePool,
    pub(crate) storage: Arc<LocalStorageContext>,
    pub(crate) engine: Engine,
    pub(crate) importer: LibraryImporter,
    pub(crate) config: StationConfig,
}

impl App {
    /// Connect to the configured database and bring its schema up to date
    pub async fn open(config: StationConfig) -> Result<Self> {
        let pool = station_storage::create_pool(
            &config.storage.database_url,
            &config.storage.pool_settings(),
        )
        .await?;
        station_storage::run_migrations(&pool).await?;

        tracing::debug!("Database ready at {}", config.storage.database_url);

        let storage = Arc::new(LocalStorageContext::new(pool.clone()));
        let engine = PlaylistBudgetEngine::new(Arc::clone(&storage), Arc::clone(&storage), config.playlist);
        let importer = LibraryImporter::new(pool.clone(), config.import.clone());

        Ok(Self {
            pool,
            storage,
            engine,
            importer,
            config,
        })
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}
