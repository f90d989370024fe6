//! Station Engine Library Importer
//!
//! Brings audio files into the catalog.
//!
//! # Architecture
//!
//! - `scanner`: finds audio files under a directory
//! - `metadata`: reads tags and stream properties
//! - `hash`: content digests for duplicate detection
//! - `copy`: places files into the managed library folder
//! - `importer`: orchestration of the import process

mod error;
mod types;

pub mod copy;
pub mod hash;
pub mod importer;
pub mod metadata;
pub mod scanner;

pub use error::ImportError;
pub use hash::{ContentHasher, Sha256Hasher};
pub use importer::LibraryImporter;
pub use metadata::{ExtractedMetadata, LoftyExtractor, MetadataExtractor};
pub use scanner::FileScanner;
pub use types::*;

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, ImportError>;
