//! Common types for the importer

use serde::{Deserialize, Serialize};
use station_core::SongId;
use std::path::PathBuf;

/// What happens to the source file on import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FileStrategy {
    /// Copy into the managed library, leaving the original in place
    #[default]
    Copy,

    /// Move into the managed library
    Move,

    /// Catalog the file where it is (breaks if the file moves)
    Reference,
}

/// Configuration for import operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Managed library folder that copied and moved files land in
    pub library_path: PathBuf,

    /// Drop folder scanned by `import-incoming` when no directory is given
    pub incoming_path: PathBuf,

    /// File management strategy
    pub file_strategy: FileStrategy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from("library"),
            incoming_path: PathBuf::from("incoming"),
            file_strategy: FileStrategy::Copy,
        }
    }
}

/// Result of importing one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// Registered as a new catalog song
    Imported { song_id: SongId },

    /// Identical content is already catalogued as `existing`
    Duplicate { existing: SongId },
}

impl ImportOutcome {
    pub fn song_id(&self) -> SongId {
        match self {
            Self::Imported { song_id } => *song_id,
            Self::Duplicate { existing } => *existing,
        }
    }
}

/// Per-file results of a batch import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: Vec<(PathBuf, SongId)>,
    pub duplicates: Vec<(PathBuf, SongId)>,
    pub failed: Vec<(PathBuf, String)>,
}

impl ImportSummary {
    /// Files looked at
    pub fn total_processed(&self) -> usize {
        self.imported.len() + self.duplicates.len() + self.failed.len()
    }

    pub(crate) fn record(&mut self, path: PathBuf, result: crate::Result<ImportOutcome>) {
        match result {
            Ok(ImportOutcome::Imported { song_id }) => self.imported.push((path, song_id)),
            Ok(ImportOutcome::Duplicate { existing }) => self.duplicates.push((path, existing)),
            Err(e) => self.failed.push((path, e.to_string())),
        }
    }
}
