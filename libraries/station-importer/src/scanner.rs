//! File scanning for audio files

use crate::{ImportError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions picked up by the scanner, compared case-insensitively
const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "aac", "m4a", "opus"];

/// Finds importable audio files below a folder
///
/// Defaults to a full-depth walk that does not follow symlinks.
#[derive(Debug, Clone, Default)]
pub struct FileScanner {
    /// Descend through symlinked directories
    follow_links: bool,

    /// `None` walks the whole tree
    max_depth: Option<usize>,
}

impl FileScanner {
    /// Scanner with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow symlinks while walking
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Limit traversal depth; 1 means the directory itself only
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Audio files under `path`, sorted by path
    ///
    /// Entries the walk cannot read are logged and skipped.
    ///
    /// # Errors
    ///
    /// `FileNotFound` if `path` does not exist, `InvalidPath` if it is not a
    /// directory.
    pub fn scan_directory(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        if !path.is_dir() {
            return Err(ImportError::InvalidPath(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let mut walker = WalkDir::new(path).follow_links(self.follow_links);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut audio_files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() && is_audio_file(entry.path()) {
                audio_files.push(entry.into_path());
            }
        }

        audio_files.sort();
        Ok(audio_files)
    }
}

/// Whether `path` has one of the supported audio extensions
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
