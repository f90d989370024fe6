//! Playlist budget engine - admission control over injected stores

use crate::admission::{self, Decision, UnknownDurationPolicy};
use crate::locks::PlaylistLocks;
use serde::{Deserialize, Serialize};
use station_core::{
    error::Result, AdmissionResult, BudgetPreset, CatalogLookup, Playlist, PlaylistEntryView,
    PlaylistId, PlaylistState, PlaylistStore, PlaylistSummary, SongId, StationError,
};
use std::sync::Arc;

/// Engine tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cost of songs whose duration the catalog does not know
    pub unknown_duration: UnknownDurationPolicy,

    /// Admission attempts before giving up on a contended playlist
    pub max_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unknown_duration: UnknownDurationPolicy::Reject,
            max_attempts: 5,
        }
    }
}

/// Decides whether songs fit a playlist's airtime budget and appends them
///
/// The engine keeps no playlist state of its own: every admission re-reads
/// the accumulated total and the highest position from the store.
pub struct PlaylistBudgetEngine<S: ?Sized, C: ?Sized> {
    store: Arc<S>,
    catalog: Arc<C>,
    config: EngineConfig,
    locks: PlaylistLocks,
}

impl<S, C> PlaylistBudgetEngine<S, C>
where
    S: PlaylistStore + ?Sized,
    C: CatalogLookup + ?Sized,
{
    pub fn new(store: Arc<S>, catalog: Arc<C>, config: EngineConfig) -> Self {
        Self {
            store,
            catalog,
            config,
            locks: PlaylistLocks::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create an empty playlist with the budget named by `budget_key`
    ///
    /// Fails with `InvalidBudgetKey` before touching the store when the key
    /// is not one of `30min`, `1h`, `1h30`, `2h`.
    pub async fn create_playlist(
        &self,
        show_name: &str,
        playlist_name: &str,
        budget_key: &str,
    ) -> Result<PlaylistId> {
        let preset = BudgetPreset::from_key(budget_key)?;
        self.create_playlist_with_preset(show_name, playlist_name, preset)
            .await
    }

    /// Create an empty playlist from an already parsed preset
    pub async fn create_playlist_with_preset(
        &self,
        show_name: &str,
        playlist_name: &str,
        preset: BudgetPreset,
    ) -> Result<PlaylistId> {
        let id = self
            .store
            .create(show_name, playlist_name, preset.seconds())
            .await?;

        tracing::info!(
            playlist_id = %id,
            show_name,
            playlist_name,
            budget = preset.key(),
            "created playlist"
        );

        Ok(id)
    }

    /// Append `song_id` to the playlist if it fits the budget
    ///
    /// Admissions on the same playlist are serialized in-process. A
    /// `PositionConflict` from the store means another writer got there
    /// first; the total and position are then re-read and the decision
    /// made again, up to `max_attempts` times.
    #[tracing::instrument(skip(self))]
    pub async fn add_song(&self, playlist_id: PlaylistId, song_id: SongId) -> Result<AdmissionResult> {
        let budget = self.store.get_budget(playlist_id).await?;
        let song_seconds = self.catalog.get_song_duration(song_id).await?;

        let _guard = self.locks.acquire(playlist_id).await;

        let max_attempts = self.config.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            tracing::debug!(attempt, ?song_seconds, budget, "evaluating admission");
            match self
                .try_admit(playlist_id, song_id, budget, song_seconds)
                .await
            {
                Err(StationError::PositionConflict { position, .. }) => {
                    tracing::warn!(attempt, position, "position taken by another writer, retrying");
                }
                outcome => return outcome,
            }
        }

        Err(StationError::Contention {
            playlist_id,
            attempts: max_attempts,
        })
    }

    async fn try_admit(
        &self,
        playlist_id: PlaylistId,
        song_id: SongId,
        budget: u32,
        song_seconds: Option<u32>,
    ) -> Result<AdmissionResult> {
        // Position before total: any entry the total misses has taken this
        // position by the time we append, and the append conflicts.
        let position = self.store.max_position(playlist_id).await? + 1;
        let tally = self.store.sum_entry_durations(playlist_id).await?;

        match admission::evaluate(budget, tally, song_seconds, self.config.unknown_duration) {
            Decision::Reject(rejection) => {
                tracing::debug!(?rejection, "song rejected");
                Ok(AdmissionResult::Rejected(rejection))
            }
            Decision::Admit { cost } => {
                self.store
                    .append_entry(playlist_id, song_id, position)
                    .await?;

                tracing::info!(position, cost, "song admitted");
                Ok(AdmissionResult::Admitted { position })
            }
        }
    }

    /// Entries ordered by position
    ///
    /// An existing playlist without entries yields an empty list; a missing
    /// playlist fails with `PlaylistNotFound`.
    pub async fn list_entries(&self, playlist_id: PlaylistId) -> Result<Vec<PlaylistEntryView>> {
        self.store.list_entries_ordered(playlist_id).await
    }

    /// Playlist header with its accumulated and remaining airtime
    ///
    /// Count and total come from one entry listing, so they agree even
    /// while another writer is appending.
    pub async fn playlist_summary(&self, playlist_id: PlaylistId) -> Result<PlaylistSummary> {
        let playlist = self.store.get_playlist(playlist_id).await?;
        let entries = self.store.list_entries_ordered(playlist_id).await?;
        let tally = admission::tally_entries(&entries);

        let total_seconds = admission::current_total(tally, self.config.unknown_duration);
        let remaining_seconds =
            u64::from(playlist.max_duration_seconds).saturating_sub(total_seconds);

        Ok(PlaylistSummary {
            state: PlaylistState::from_entry_count(entries.len()),
            entry_count: entries.len(),
            total_seconds,
            remaining_seconds,
            playlist,
        })
    }

    /// Every playlist, oldest first
    pub async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        self.store.list_playlists().await
    }
}
