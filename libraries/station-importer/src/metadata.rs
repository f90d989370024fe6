//! Metadata extraction from audio files

use crate::{ImportError, Result};
use lofty::{Accessor, AudioFile, Probe, TaggedFileExt};
use station_core::split_genres;
use std::path::Path;

/// Artist recorded when the tags name none
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Metadata read from an audio file, before catalog fallbacks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,

    /// Genres, already split and trimmed
    pub genres: Vec<String>,

    pub year: Option<i32>,
    pub track_number: Option<u32>,

    /// Whole seconds, truncated
    pub duration_seconds: Option<u32>,

    pub channels: Option<u8>,

    /// Container type, e.g. `mpeg`, `flac`
    pub codec: Option<String>,
}

impl ExtractedMetadata {
    /// Tagged title, or the file name without extension
    pub fn title_or_stem(&self, path: &Path) -> String {
        self.title
            .clone()
            .or_else(|| {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| path.display().to_string())
    }

    pub fn artist_or_unknown(&self) -> String {
        self.artist
            .clone()
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string())
    }

    /// Genre text as stored on the song row
    pub fn genre_text(&self) -> Option<String> {
        if self.genres.is_empty() {
            None
        } else {
            Some(self.genres.join(", "))
        }
    }
}

/// Reads tags and stream properties from a file
pub trait MetadataExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<ExtractedMetadata>;
}

/// Extractor backed by lofty
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyExtractor;

impl MetadataExtractor for LoftyExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedMetadata> {
        let unreadable = |reason: String| ImportError::UnreadableMedia {
            path: path.to_path_buf(),
            reason,
        };

        let tagged_file = Probe::open(path)
            .map_err(|e| unreadable(format!("Failed to open file: {}", e)))?
            .read()
            .map_err(|e| unreadable(format!("Failed to read file: {}", e)))?;

        let properties = tagged_file.properties();
        let duration_seconds = u32::try_from(properties.duration().as_secs()).ok();
        let channels = properties.channels();
        let codec = Some(format!("{:?}", tagged_file.file_type()).to_lowercase());

        let mut metadata = ExtractedMetadata {
            duration_seconds,
            channels,
            codec,
            ..ExtractedMetadata::default()
        };

        // Prefer ID3v2 for MP3, Vorbis comments for OGG/FLAC
        if let Some(tag) = tagged_file.primary_tag().or(tagged_file.first_tag()) {
            metadata.title = non_blank(tag.title().map(|s| s.to_string()));
            metadata.artist = non_blank(tag.artist().map(|s| s.to_string()));
            metadata.album = non_blank(tag.album().map(|s| s.to_string()));
            metadata.genres = tag.genre().map(|g| split_genres(&g)).unwrap_or_default();
            metadata.year = tag.year().and_then(|y| i32::try_from(y).ok());
            metadata.track_number = tag.track();
        }

        Ok(metadata)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_fallbacks() {
        let metadata = ExtractedMetadata::default();
        let path = PathBuf::from("/incoming/Take Five.mp3");

        assert_eq!(metadata.title_or_stem(&path), "Take Five");
        assert_eq!(metadata.artist_or_unknown(), "Unknown Artist");
        assert_eq!(metadata.genre_text(), None);
    }

    #[test]
    fn test_tagged_values_win() {
        let metadata = ExtractedMetadata {
            title: Some("So What".to_string()),
            artist: Some("Miles Davis".to_string()),
            genres: vec!["Jazz".to_string(), "Modal".to_string()],
            ..ExtractedMetadata::default()
        };
        let path = PathBuf::from("track01.mp3");

        assert_eq!(metadata.title_or_stem(&path), "So What");
        assert_eq!(metadata.artist_or_unknown(), "Miles Davis");
        assert_eq!(metadata.genre_text().as_deref(), Some("Jazz, Modal"));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" Blue ".to_string())), Some("Blue".to_string()));
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_unreadable_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.flac");
        fs::write(&path, b"definitely not a flac stream").unwrap();

        let err = LoftyExtractor.extract(&path).unwrap_err();
        assert!(matches!(err, ImportError::UnreadableMedia { .. }));
    }
}
