//! Import orchestration - hashing, metadata, placement and cataloguing

use crate::{
    copy, hash::ContentHasher, metadata::MetadataExtractor, scanner::FileScanner, ImportConfig,
    ImportError, ImportOutcome, ImportSummary, LoftyExtractor, Result, Sha256Hasher,
};
use sqlx::SqlitePool;
use station_core::{NewSong, StationError};
use std::path::Path;

/// Brings audio files into the catalog
pub struct LibraryImporter<E = LoftyExtractor, H = Sha256Hasher> {
    pool: SqlitePool,
    config: ImportConfig,
    extractor: E,
    hasher: H,
}

impl LibraryImporter {
    /// Importer reading tags with lofty and hashing with SHA-256
    pub fn new(pool: SqlitePool, config: ImportConfig) -> Self {
        Self::with_parts(pool, config, LoftyExtractor, Sha256Hasher)
    }
}

impl<E, H> LibraryImporter<E, H>
where
    E: MetadataExtractor,
    H: ContentHasher,
{
    pub fn with_parts(pool: SqlitePool, config: ImportConfig, extractor: E, hasher: H) -> Self {
        Self {
            pool,
            config,
            extractor,
            hasher,
        }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import one audio file
    ///
    /// Content already in the catalog is reported as `Duplicate` and the
    /// file is left untouched. If cataloguing fails after the file was
    /// placed, the placement is undone.
    pub async fn import_file(&self, path: &Path) -> Result<ImportOutcome> {
        if !path.is_file() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file_hash = self.hasher.hash_file(path)?;
        if let Some(existing) = station_storage::songs::find_by_hash(&self.pool, &file_hash).await? {
            tracing::info!("Duplicate file skipped: {} (song {})", path.display(), existing);
            return Ok(ImportOutcome::Duplicate { existing });
        }

        let metadata = self.extractor.extract(path)?;
        let placed_path = copy::place_file(
            path,
            &self.config.library_path,
            &metadata,
            self.config.file_strategy,
        )?;

        let song = NewSong {
            title: metadata.title_or_stem(path),
            artist: metadata.artist_or_unknown(),
            album: metadata.album.clone(),
            genre: metadata.genre_text(),
            year: metadata.year,
            track_number: metadata.track_number,
            duration_seconds: metadata.duration_seconds,
            channels: metadata.channels,
            codec: metadata.codec.clone(),
            file_path: placed_path.clone(),
            file_hash: file_hash.clone(),
            tags: metadata.genres.clone(),
        };
        let label = format!("{} - {}", song.artist, song.title);

        match station_storage::songs::create(&self.pool, song).await {
            Ok(song_id) => {
                tracing::info!("Imported: {} (song {})", label, song_id);
                Ok(ImportOutcome::Imported { song_id })
            }
            Err(e) => {
                if let Err(revert) =
                    copy::revert_placement(path, &placed_path, self.config.file_strategy)
                {
                    tracing::error!(
                        "Failed to undo placement of {}: {}",
                        placed_path.display(),
                        revert
                    );
                }

                // Lost a race with a concurrent import of the same content
                if matches!(e, StationError::Duplicate(_)) {
                    if let Some(existing) =
                        station_storage::songs::find_by_hash(&self.pool, &file_hash).await?
                    {
                        return Ok(ImportOutcome::Duplicate { existing });
                    }
                }

                Err(e.into())
            }
        }
    }

    /// Import every audio file under `directory`
    ///
    /// A file that fails is recorded in the summary and the batch goes on.
    pub async fn import_directory(&self, directory: &Path) -> Result<ImportSummary> {
        let files = FileScanner::new().scan_directory(directory)?;
        tracing::info!("Importing {} files from {}", files.len(), directory.display());

        let mut summary = ImportSummary::default();
        for file_path in files {
            let result = self.import_file(&file_path).await;
            if let Err(e) = &result {
                tracing::error!("Failed to import {}: {}", file_path.display(), e);
            }
            summary.record(file_path, result);
        }

        tracing::info!(
            "Import finished: {} imported, {} duplicates, {} failed",
            summary.imported.len(),
            summary.duplicates.len(),
            summary.failed.len()
        );

        Ok(summary)
    }
}
