/// Playlist domain types
use crate::types::{PlaylistId, SongId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A show playlist with a fixed airtime budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Store-assigned identifier
    pub id: PlaylistId,

    /// Show this playlist airs on
    pub show_name: String,

    /// Display name of the playlist
    pub playlist_name: String,

    /// Budget fixed at creation from a preset
    pub max_duration_seconds: u32,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// One admitted entry joined with its song metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntryView {
    /// 1-based insertion index, never reused
    pub position: u32,
    /// Admitted song
    pub song_id: SongId,
    /// Song title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Album title
    pub album: Option<String>,
    /// `None` when the catalog has no duration for the song
    pub duration_seconds: Option<u32>,
}

/// Observable playlist lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistState {
    /// No entries yet
    Empty,
    /// At least one admitted entry
    Populated,
}

impl PlaylistState {
    /// Derive the state from an entry count
    pub fn from_entry_count(count: usize) -> Self {
        if count == 0 {
            Self::Empty
        } else {
            Self::Populated
        }
    }
}

/// Sum of the durations of a playlist's entries
///
/// Entries whose song has no known duration are counted separately so the
/// caller decides what they cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationTally {
    /// Sum over entries with a known duration
    pub known_seconds: u64,
    /// Entries whose duration is unknown
    pub unknown_entries: u64,
}

/// Playlist header plus its accumulated airtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    /// Playlist header
    pub playlist: Playlist,
    /// Empty or populated
    pub state: PlaylistState,
    /// Number of admitted entries
    pub entry_count: usize,
    /// Accumulated seconds, as charged against the budget
    pub total_seconds: u64,
    /// Budget left, never negative
    pub remaining_seconds: u64,
}

/// Why a candidate song was not admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Appending would push the total past the budget
    ExceedsBudget,
    /// The song has no known duration and the policy refuses to guess
    UnknownDuration,
}

/// Details of a rejected admission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Which rule refused the song
    pub reason: RejectionReason,
    /// Playlist budget
    pub budget_seconds: u32,
    /// Accumulated total at decision time
    pub current_seconds: u64,
    /// Cost charged for the candidate (`None` if unknown)
    pub song_seconds: Option<u32>,
}

/// Outcome of asking to append a song to a playlist
///
/// A rejection is an expected outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdmissionResult {
    /// The song was appended at `position`
    Admitted {
        /// Position assigned to the new entry
        position: u32,
    },
    /// Nothing was written
    Rejected(Rejection),
}

impl AdmissionResult {
    /// Whether the song was appended
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted { .. })
    }

    /// Position of the new entry, if admitted
    pub fn position(&self) -> Option<u32> {
        match self {
            Self::Admitted { position } => Some(*position),
            Self::Rejected(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_from_count() {
        assert_eq!(PlaylistState::from_entry_count(0), PlaylistState::Empty);
        assert_eq!(PlaylistState::from_entry_count(3), PlaylistState::Populated);
    }

    #[test]
    fn admission_accessors() {
        let admitted = AdmissionResult::Admitted { position: 2 };
        assert!(admitted.is_admitted());
        assert_eq!(admitted.position(), Some(2));

        let rejected = AdmissionResult::Rejected(Rejection {
            reason: RejectionReason::ExceedsBudget,
            budget_seconds: 1800,
            current_seconds: 1000,
            song_seconds: Some(900),
        });
        assert!(!rejected.is_admitted());
        assert_eq!(rejected.position(), None);
    }

    #[test]
    fn admission_serializes_with_outcome_tag() {
        let json = serde_json::to_value(AdmissionResult::Admitted { position: 1 }).unwrap();
        assert_eq!(json["outcome"], "admitted");
        assert_eq!(json["position"], 1);
    }
}
