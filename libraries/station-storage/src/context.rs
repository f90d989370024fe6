use crate::{playlists, songs};
use async_trait::async_trait;
use sqlx::SqlitePool;
use station_core::{
    error::Result, CatalogLookup, DurationTally, Playlist, PlaylistEntryView, PlaylistId,
    PlaylistStore, SongId, StationError,
};

/// Local storage context using `SQLite`
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PlaylistStore for LocalStorageContext {
    async fn create(
        &self,
        show_name: &str,
        playlist_name: &str,
        max_duration_seconds: u32,
    ) -> Result<PlaylistId> {
        playlists::create(&self.pool, show_name, playlist_name, max_duration_seconds).await
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Playlist> {
        playlists::get_by_id(&self.pool, id)
            .await?
            .ok_or(StationError::PlaylistNotFound(id))
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        playlists::get_all(&self.pool).await
    }

    async fn get_budget(&self, id: PlaylistId) -> Result<u32> {
        playlists::get_budget(&self.pool, id).await
    }

    async fn sum_entry_durations(&self, id: PlaylistId) -> Result<DurationTally> {
        playlists::sum_entry_durations(&self.pool, id).await
    }

    async fn max_position(&self, id: PlaylistId) -> Result<u32> {
        playlists::max_position(&self.pool, id).await
    }

    async fn append_entry(&self, id: PlaylistId, song_id: SongId, position: u32) -> Result<()> {
        playlists::append_entry(&self.pool, id, song_id, position).await
    }

    async fn list_entries_ordered(&self, id: PlaylistId) -> Result<Vec<PlaylistEntryView>> {
        playlists::list_entries_ordered(&self.pool, id).await
    }
}

#[async_trait]
impl CatalogLookup for LocalStorageContext {
    async fn get_song_duration(&self, song_id: SongId) -> Result<Option<u32>> {
        songs::get_duration(&self.pool, song_id).await
    }
}
