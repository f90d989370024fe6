//! Station Engine Core
//!
//! Domain types, collaborator traits, and error handling shared by every
//! Station Engine crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Playlist`, `PlaylistEntryView`, `BudgetPreset`, `Song`, etc.
//! - **Collaborator Traits**: `PlaylistStore`, `CatalogLookup`
//! - **Error Handling**: Unified `StationError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use station_core::types::{AdmissionResult, BudgetPreset};
//!
//! let preset: BudgetPreset = "1h30".parse().unwrap();
//! assert_eq!(preset.seconds(), 5400);
//!
//! let result = AdmissionResult::Admitted { position: 1 };
//! assert!(result.is_admitted());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Error taxonomy shared by every station crate
pub mod error;
/// Store and catalog traits
pub mod storage;
/// Domain types
pub mod types;

// Re-export commonly used types
pub use error::{Result, StationError};
pub use storage::{CatalogLookup, PlaylistStore};

pub use types::{
    // Playlists
    AdmissionResult, BudgetPreset, DurationTally, Playlist, PlaylistEntryView, PlaylistState,
    PlaylistSummary, Rejection, RejectionReason,
    // Catalog
    split_genres, NewSong, Song, SongFile, SongQuery, SongView, YearRange,
    // Ids
    PlaylistId, SongId, TagId,
};
