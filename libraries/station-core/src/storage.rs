//! Collaborator traits the playlist engine is written against

use crate::error::Result;
use crate::types::{DurationTally, Playlist, PlaylistEntryView, PlaylistId, SongId};
use async_trait::async_trait;

/// Persistence for playlists and their ordered entries
///
/// Every per-playlist operation fails with `StationError::PlaylistNotFound`
/// when the playlist does not exist; an existing playlist without entries
/// yields zero values or an empty list instead.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Persist a new playlist and return its id
    async fn create(
        &self,
        show_name: &str,
        playlist_name: &str,
        max_duration_seconds: u32,
    ) -> Result<PlaylistId>;

    /// Get the playlist header
    async fn get_playlist(&self, id: PlaylistId) -> Result<Playlist>;

    /// All playlists, oldest first
    async fn list_playlists(&self) -> Result<Vec<Playlist>>;

    /// Budget fixed at creation
    async fn get_budget(&self, id: PlaylistId) -> Result<u32>;

    /// Durations of the current entries, recomputed on every call
    async fn sum_entry_durations(&self, id: PlaylistId) -> Result<DurationTally>;

    /// Highest assigned position, 0 when there are no entries
    async fn max_position(&self, id: PlaylistId) -> Result<u32>;

    /// Append an entry at `position`
    ///
    /// Fails with `StationError::PositionConflict` when the position is
    /// already taken, so a writer holding a stale maximum can retry.
    async fn append_entry(&self, id: PlaylistId, song_id: SongId, position: u32) -> Result<()>;

    /// Entries ordered by ascending position
    async fn list_entries_ordered(&self, id: PlaylistId) -> Result<Vec<PlaylistEntryView>>;
}

/// Read access to catalog song durations
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Duration of a song in whole seconds
    ///
    /// `Ok(None)` means the song exists but its duration is unknown;
    /// a missing song fails with `StationError::SongNotFound`.
    async fn get_song_duration(&self, song_id: SongId) -> Result<Option<u32>>;
}
