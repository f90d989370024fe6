//! Text rendering for terminal output

use serde::Serialize;
use station_core::{
    AdmissionResult, BudgetPreset, Playlist, PlaylistEntryView, PlaylistState, PlaylistSummary,
    RejectionReason, SongView,
};
use station_importer::{ImportOutcome, ImportSummary};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Seconds as `m:ss`; minutes are not wrapped into hours
pub fn duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Like [`duration`], with a placeholder for unknown lengths
pub fn optional_duration(seconds: Option<u32>) -> String {
    seconds
        .map(|s| duration(u64::from(s)))
        .unwrap_or_else(|| "--:--".to_string())
}

/// Clean up a path argument pasted from a file manager or shell
///
/// Surrounding whitespace and one pair of matching quotes are removed.
pub fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed);
    PathBuf::from(unquoted.trim())
}

/// Pretty JSON, or the text rendering
pub fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> crate::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text(value))
    }
}

pub fn import_outcome(path: &Path, outcome: &ImportOutcome) -> String {
    match outcome {
        ImportOutcome::Imported { song_id } => {
            format!("Imported {} as song {}", path.display(), song_id)
        }
        ImportOutcome::Duplicate { existing } => {
            format!(
                "Skipped {}: same content already catalogued as song {}",
                path.display(),
                existing
            )
        }
    }
}

pub fn import_summary(summary: &ImportSummary) -> String {
    let mut out = String::new();
    for (path, song_id) in &summary.imported {
        let _ = writeln!(out, "imported   {}  (song {})", path.display(), song_id);
    }
    for (path, song_id) in &summary.duplicates {
        let _ = writeln!(out, "duplicate  {}  (song {})", path.display(), song_id);
    }
    for (path, reason) in &summary.failed {
        let _ = writeln!(out, "failed     {}  {}", path.display(), reason);
    }
    let _ = write!(
        out,
        "{} imported, {} duplicates, {} failed",
        summary.imported.len(),
        summary.duplicates.len(),
        summary.failed.len()
    );
    out
}

pub fn songs(songs: &[SongView]) -> String {
    if songs.is_empty() {
        return "No matching songs.".to_string();
    }

    let mut out = format!(
        "{:>6}  {:<32}  {:<24}  {:<24}  {:>4}  {:>6}  Tags",
        "ID", "Title", "Artist", "Album", "Year", "Length"
    );
    for song in songs {
        let _ = write!(
            out,
            "\n{:>6}  {:<32}  {:<24}  {:<24}  {:>4}  {:>6}  {}",
            song.song_id,
            clip(&song.title, 32),
            clip(&song.artist, 24),
            clip(song.album.as_deref().unwrap_or("-"), 24),
            song.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
            optional_duration(song.duration_seconds),
            song.tags.join(", ")
        );
    }
    out
}

pub fn playlist_created(playlist: &Playlist) -> String {
    format!(
        "Created playlist {} '{}' for {} ({} budget)",
        playlist.id,
        playlist.playlist_name,
        playlist.show_name,
        duration(u64::from(playlist.max_duration_seconds))
    )
}

pub fn admission(result: &AdmissionResult) -> String {
    match result {
        AdmissionResult::Admitted { position } => format!("Added at position {}", position),
        AdmissionResult::Rejected(rejection) => match rejection.reason {
            RejectionReason::UnknownDuration => {
                "Rejected: the song's duration is unknown".to_string()
            }
            RejectionReason::ExceedsBudget => format!(
                "Rejected: song runs {} but only {} of {} remains",
                optional_duration(rejection.song_seconds),
                duration(
                    u64::from(rejection.budget_seconds).saturating_sub(rejection.current_seconds)
                ),
                duration(u64::from(rejection.budget_seconds))
            ),
        },
    }
}

pub fn playlist_detail(summary: &PlaylistSummary, entries: &[PlaylistEntryView]) -> String {
    let playlist = &summary.playlist;
    let mut out = format!(
        "Playlist {} '{}' for {}\n",
        playlist.id, playlist.playlist_name, playlist.show_name
    );

    if summary.state == PlaylistState::Empty {
        let _ = write!(
            out,
            "This playlist is empty; {} of airtime available.",
            duration(u64::from(playlist.max_duration_seconds))
        );
        return out;
    }

    let _ = writeln!(
        out,
        "{} used of {}, {} remaining",
        duration(summary.total_seconds),
        duration(u64::from(playlist.max_duration_seconds)),
        duration(summary.remaining_seconds)
    );
    for entry in entries {
        let _ = write!(
            out,
            "\n{:>3}. {:>6}  {} - {}",
            entry.position,
            optional_duration(entry.duration_seconds),
            entry.artist,
            entry.title
        );
    }
    out
}

pub fn playlists(playlists: &[Playlist]) -> String {
    if playlists.is_empty() {
        return "No playlists yet.".to_string();
    }

    let mut out = format!("{:>6}  {:<24}  {:<24}  {:>7}", "ID", "Show", "Playlist", "Budget");
    for playlist in playlists {
        let _ = write!(
            out,
            "\n{:>6}  {:<24}  {:<24}  {:>7}",
            playlist.id,
            clip(&playlist.show_name, 24),
            clip(&playlist.playlist_name, 24),
            duration(u64::from(playlist.max_duration_seconds))
        );
    }
    out
}

pub fn presets(presets: &[BudgetPreset]) -> String {
    presets
        .iter()
        .map(|p| format!("{:<6} {}", p.key(), duration(u64::from(p.seconds()))))
        .collect::<Vec<_>>()
        .join("\n")
}

fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut clipped: String = s.chars().take(width.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}
