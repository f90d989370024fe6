use crate::{format, App, Result};
use station_core::SongQuery;

impl App {
    /// Search the catalog
    pub async fn search(&self, query: &SongQuery, json: bool) -> Result<String> {
        let songs = station_storage::songs::search(&self.pool, query).await?;
        tracing::debug!("Search matched {} songs", songs.len());
        format::emit(json, &songs, |s| format::songs(s))
    }
}
