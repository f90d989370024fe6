/// Catalog domain types
use crate::types::SongId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Descriptive metadata for a catalog song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Catalog id
    pub id: SongId,
    /// Song title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Album title, if tagged
    pub album: Option<String>,
    /// Raw genre text as tagged, comma separated
    pub genre: Option<String>,
    /// Release year
    pub year: Option<i32>,
    /// Track number on the album
    pub track_number: Option<u32>,
    /// When the song was catalogued
    pub created_at: DateTime<Utc>,
}

/// Technical record of the audio file backing a song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongFile {
    /// Song this file backs
    pub song_id: SongId,
    /// Length in whole seconds, if the file reported one
    pub duration_seconds: Option<u32>,
    /// Channel count
    pub channels: Option<u8>,
    /// Codec or container name
    pub codec: Option<String>,
    /// Where the file lives
    pub file_path: PathBuf,
    /// Content digest used for deduplication
    pub file_hash: String,
}

/// Everything needed to register a song in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    /// Song title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Album title
    pub album: Option<String>,
    /// Raw genre text
    pub genre: Option<String>,
    /// Release year
    pub year: Option<i32>,
    /// Track number on the album
    pub track_number: Option<u32>,
    /// Length in whole seconds
    pub duration_seconds: Option<u32>,
    /// Channel count
    pub channels: Option<u8>,
    /// Codec or container name
    pub codec: Option<String>,
    /// Final location of the audio file
    pub file_path: PathBuf,
    /// Content digest
    pub file_hash: String,
    /// Category tags to attach (usually the split genres)
    pub tags: Vec<String>,
}

/// Search result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongView {
    /// Catalog id
    pub song_id: SongId,
    /// Song title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Album title
    pub album: Option<String>,
    /// Release year
    pub year: Option<i32>,
    /// Length in whole seconds
    pub duration_seconds: Option<u32>,
    /// Attached tag names
    pub tags: Vec<String>,
}

/// Inclusive year range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    /// First year
    pub from: i32,
    /// Last year
    pub to: i32,
}

/// Catalog search filters; all present filters must match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongQuery {
    /// Substring match on title
    pub title: Option<String>,
    /// Substring match on artist
    pub artist: Option<String>,
    /// Substring match on album
    pub album: Option<String>,
    /// Exact tag name
    pub tag: Option<String>,
    /// Release year range
    pub years: Option<YearRange>,
    /// Maximum rows returned
    pub limit: u32,
}

impl SongQuery {
    /// Default cap on returned rows
    pub const DEFAULT_LIMIT: u32 = 100;

    /// Query matching every song
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by title substring
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Filter by artist substring
    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Filter by album substring
    pub fn album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Filter by exact tag name
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Filter by inclusive release year range
    pub fn years(mut self, from: i32, to: i32) -> Self {
        self.years = Some(YearRange { from, to });
        self
    }

    /// Cap the number of rows
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for SongQuery {
    fn default() -> Self {
        Self {
            title: None,
            artist: None,
            album: None,
            tag: None,
            years: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Split a raw genre string into tag names
///
/// Genres are separated by `,`, `;` or `/`; blanks are dropped and
/// duplicates keep their first occurrence.
pub fn split_genres(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for part in raw.split(&[',', ';', '/'][..]) {
        let part = part.trim();
        if !part.is_empty() && !tags.iter().any(|t| t == part) {
            tags.push(part.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_builder_sets_filters() {
        let q = SongQuery::new().artist("Nina").tag("jazz").years(1960, 1969).limit(10);
        assert_eq!(q.artist.as_deref(), Some("Nina"));
        assert_eq!(q.tag.as_deref(), Some("jazz"));
        assert_eq!(q.years, Some(YearRange { from: 1960, to: 1969 }));
        assert_eq!(q.limit, 10);
        assert!(q.title.is_none());
    }

    #[test]
    fn default_limit() {
        assert_eq!(SongQuery::default().limit, 100);
    }

    #[test]
    fn genres_split_on_all_separators() {
        assert_eq!(
            split_genres("Jazz, Soul;Funk / Jazz ,,"),
            vec!["Jazz", "Soul", "Funk"]
        );
        assert!(split_genres("  ").is_empty());
    }
}
