//! Station Engine Playlists
//!
//! Duration-budget admission control for show playlists.
//!
//! A playlist is created with a budget preset (`30min`, `1h`, `1h30`, `2h`).
//! Songs are appended only while the summed duration of the entries stays
//! within that budget; each admitted song gets the next insertion position.
//!
//! # Architecture
//!
//! - `admission`: the pure admission rule and the unknown-duration policy
//! - `locks`: per-playlist serialization of check-then-append
//! - `engine`: `PlaylistBudgetEngine`, wiring the rule to injected
//!   `PlaylistStore` / `CatalogLookup` implementations
//!
//! # Example
//!
//! ```rust,no_run
//! use station_core::SongId;
//! use station_playlist::{EngineConfig, PlaylistBudgetEngine};
//! use station_storage::{create_pool, run_migrations, LocalStorageContext, PoolSettings};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://station.db", &PoolSettings::default()).await?;
//! run_migrations(&pool).await?;
//! let storage = Arc::new(LocalStorageContext::new(pool));
//!
//! let engine = PlaylistBudgetEngine::new(storage.clone(), storage, EngineConfig::default());
//! let playlist = engine.create_playlist("Morning Show", "Monday", "30min").await?;
//! let outcome = engine.add_song(playlist, SongId::new(1)).await?;
//! # Ok(())
//! # }
//! ```

pub mod admission;
pub mod engine;
pub mod locks;

pub use admission::UnknownDurationPolicy;
pub use engine::{EngineConfig, PlaylistBudgetEngine};
pub use locks::PlaylistLocks;
