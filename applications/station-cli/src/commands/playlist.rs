use crate::{format, App, Result};
use serde::Serialize;
use station_core::{PlaylistEntryView, PlaylistId, PlaylistStore, PlaylistSummary, SongId};

#[derive(Serialize)]
struct PlaylistDetail {
    #[serde(flatten)]
    summary: PlaylistSummary,
    entries: Vec<PlaylistEntryView>,
}

impl App {
    pub async fn playlist_create(
        &self,
        show_name: &str,
        playlist_name: &str,
        budget: &str,
        json: bool,
    ) -> Result<String> {
        let id = self
            .engine
            .create_playlist(show_name, playlist_name, budget)
            .await?;
        let playlist = self.storage.get_playlist(id).await?;
        format::emit(json, &playlist, format::playlist_created)
    }

    pub async fn playlist_add(&self, playlist: PlaylistId, song: SongId, json: bool) -> Result<String> {
        let result = self.engine.add_song(playlist, song).await?;
        format::emit(json, &result, format::admission)
    }

    /// Header and entries; a missing playlist is an error, an empty one is not
    pub async fn playlist_show(&self, playlist: PlaylistId, json: bool) -> Result<String> {
        let summary = self.engine.playlist_summary(playlist).await?;
        let entries = self.engine.list_entries(playlist).await?;
        let detail = PlaylistDetail { summary, entries };
        format::emit(json, &detail, |d| format::playlist_detail(&d.summary, &d.entries))
    }

    pub async fn playlist_list(&self, json: bool) -> Result<String> {
        let playlists = self.engine.list_playlists().await?;
        format::emit(json, &playlists, |p| format::playlists(p))
    }
}
