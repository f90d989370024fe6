/// Core error types for Station Engine
use crate::types::{PlaylistId, SongId};
use thiserror::Error;

/// Result type alias using `StationError`
pub type Result<T> = std::result::Result<T, StationError>;

/// Core error type for Station Engine
///
/// A budget rejection is not represented here: it is a normal
/// `AdmissionResult::Rejected` outcome.
#[derive(Error, Debug)]
pub enum StationError {
    /// Budget key outside the preset table
    #[error("Invalid budget key: {0:?} (expected one of 30min, 1h, 1h30, 2h)")]
    InvalidBudgetKey(String),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Song not found in the catalog
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// The backing store could not be reached or timed out
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Another writer already took this position
    #[error("Position {position} already taken in playlist {playlist_id}")]
    PositionConflict {
        /// Playlist the append targeted
        playlist_id: PlaylistId,
        /// Position that was already present
        position: u32,
    },

    /// Admission kept losing position races and gave up
    #[error("Playlist {playlist_id} is contended: gave up after {attempts} attempts")]
    Contention {
        /// Playlist being appended to
        playlist_id: PlaylistId,
        /// Number of admission attempts made
        attempts: u32,
    },

    /// Duplicate entry
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl StationError {
    /// Create a store unavailable error
    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Whether retrying the same call later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::Contention { .. })
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for StationError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::StoreUnavailable(err.to_string())
            }
            sqlx::Error::Database(ref db_err) if is_busy_code(db_err.code().as_deref()) => {
                Self::StoreUnavailable(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

/// SQLITE_BUSY (5) and SQLITE_LOCKED (6), including extended codes
#[cfg(feature = "sqlx-support")]
fn is_busy_code(code: Option<&str>) -> bool {
    code.and_then(|c| c.parse::<i32>().ok())
        .is_some_and(|c| matches!(c & 0xff, 5 | 6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors() {
        assert!(StationError::store_unavailable("timeout").is_transient());
        assert!(StationError::Contention {
            playlist_id: PlaylistId::new(1),
            attempts: 5
        }
        .is_transient());
        assert!(!StationError::PlaylistNotFound(PlaylistId::new(1)).is_transient());
        assert!(!StationError::InvalidBudgetKey("3h".into()).is_transient());
    }

    #[test]
    fn not_found_messages_name_the_id() {
        let err = StationError::PlaylistNotFound(PlaylistId::new(999));
        assert_eq!(err.to_string(), "Playlist not found: 999");

        let err = StationError::SongNotFound(SongId::new(7));
        assert_eq!(err.to_string(), "Song not found: 7");
    }

    #[cfg(feature = "sqlx-support")]
    #[test]
    fn busy_and_locked_codes() {
        assert!(is_busy_code(Some("5")));
        assert!(is_busy_code(Some("517")));
        assert!(is_busy_code(Some("6")));
        assert!(is_busy_code(Some("262")));
        assert!(!is_busy_code(Some("19")));
        assert!(!is_busy_code(Some("2067")));
        assert!(!is_busy_code(Some("not a code")));
        assert!(!is_busy_code(None));
    }

    #[cfg(feature = "sqlx-support")]
    #[test]
    fn pool_errors_map_to_store_unavailable() {
        let err = StationError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StationError::StoreUnavailable(_)));
        assert!(err.is_transient());

        let err = StationError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, StationError::StoreUnavailable(_)));

        let err = StationError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StationError::Database(_)));
        assert!(!err.is_transient());
    }
}
