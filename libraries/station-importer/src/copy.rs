//! Placing files into the managed library with organized naming

use crate::{metadata::ExtractedMetadata, FileStrategy, ImportError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Highest ` (n)` suffix tried before giving up
const MAX_CONFLICT_SUFFIX: u32 = 999;

/// Put `source_path` where the catalog should point to
///
/// `Copy` and `Move` land the file in `library_path` as
/// `Artist - Title.ext`; `Reference` returns the source path unchanged.
pub fn place_file(
    source_path: &Path,
    library_path: &Path,
    metadata: &ExtractedMetadata,
    strategy: FileStrategy,
) -> Result<PathBuf> {
    let dest_path = match strategy {
        FileStrategy::Reference => return Ok(source_path.to_path_buf()),
        FileStrategy::Copy | FileStrategy::Move => {
            fs::create_dir_all(library_path)?;
            let filename = generate_filename(source_path, metadata)?;
            free_destination(library_path, &filename)?
        }
    };

    if strategy == FileStrategy::Move {
        move_file(source_path, &dest_path)?;
    } else {
        fs::copy(source_path, &dest_path)?;
    }

    tracing::debug!(
        "Placed {} at {} ({:?})",
        source_path.display(),
        dest_path.display(),
        strategy
    );

    Ok(dest_path)
}

/// Undo `place_file` after the catalog refused the file
pub fn revert_placement(
    source_path: &Path,
    placed_path: &Path,
    strategy: FileStrategy,
) -> Result<()> {
    match strategy {
        FileStrategy::Copy => fs::remove_file(placed_path)?,
        FileStrategy::Move => move_file(placed_path, source_path)?,
        FileStrategy::Reference => {}
    }
    Ok(())
}

/// Rename, falling back to copy and delete across filesystems
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_err() {
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}

/// "Artist - Title.ext", with the catalog fallbacks for missing tags
pub fn generate_filename(source_path: &Path, metadata: &ExtractedMetadata) -> Result<String> {
    let extension = source_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| {
            ImportError::InvalidPath(format!("{} has no extension", source_path.display()))
        })?;

    let artist = sanitize_filename_part(&metadata.artist_or_unknown());
    let title = sanitize_filename_part(&metadata.title_or_stem(source_path));

    Ok(format!("{} - {}.{}", artist, title, extension))
}

/// Replace characters that are invalid on common filesystems
pub fn sanitize_filename_part(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// First of "name.ext", "name (1).ext", "name (2).ext", ... that is free
fn free_destination(library_path: &Path, filename: &str) -> Result<PathBuf> {
    let candidate = library_path.join(filename);
    if !candidate.exists() {
        return Ok(candidate);
    }

    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ImportError::InvalidPath(filename.to_string()))?;
    let extension = path.extension().and_then(|ext| ext.to_str());

    for counter in 1..=MAX_CONFLICT_SUFFIX {
        let name = match extension {
            Some(ext) => format!("{} ({}).{}", stem, counter, ext),
            None => format!("{} ({})", stem, counter),
        };

        let candidate = library_path.join(name);
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(ImportError::NameExhausted(filename.to_string()))
}
