use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use station_core::{
    error::Result, DurationTally, Playlist, PlaylistEntryView, PlaylistId, SongId, StationError,
};

fn playlist_from_row(row: &SqliteRow) -> Playlist {
    Playlist {
        id: row.get("id"),
        show_name: row.get("show_name"),
        playlist_name: row.get("playlist_name"),
        max_duration_seconds: row.get::<i64, _>("max_duration_seconds") as u32,
        created_at: row.get("created_at"),
    }
}

/// Create new playlist
pub async fn create(
    pool: &SqlitePool,
    show_name: &str,
    playlist_name: &str,
    max_duration_seconds: u32,
) -> Result<PlaylistId> {
    if max_duration_seconds == 0 {
        return Err(StationError::invalid_input(
            "playlist budget must be positive",
        ));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO playlists (show_name, playlist_name, max_duration_seconds)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(show_name)
    .bind(playlist_name)
    .bind(i64::from(max_duration_seconds))
    .execute(pool)
    .await?;

    Ok(PlaylistId::new(result.last_insert_rowid()))
}

/// Get playlist by ID
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        r#"
        SELECT id, show_name, playlist_name, max_duration_seconds, created_at
        FROM playlists
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(playlist_from_row))
}

/// Get all playlists, oldest first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        r#"
        SELECT id, show_name, playlist_name, max_duration_seconds, created_at
        FROM playlists
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(playlist_from_row).collect())
}

/// Budget of a playlist in seconds
pub async fn get_budget(pool: &SqlitePool, id: PlaylistId) -> Result<u32> {
    let budget: Option<i64> =
        sqlx::query_scalar("SELECT max_duration_seconds FROM playlists WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    budget
        .map(|b| b as u32)
        .ok_or(StationError::PlaylistNotFound(id))
}

/// Sum the durations of the playlist's current entries
///
/// Entries whose song has no file record or a NULL duration are counted
/// in `unknown_entries` instead of the sum.
pub async fn sum_entry_durations(pool: &SqlitePool, id: PlaylistId) -> Result<DurationTally> {
    ensure_exists(pool, id).await?;

    let row = sqlx::query(
        r#"
        SELECT
            COALESCE(SUM(sf.duration_seconds), 0) AS known_seconds,
            COALESCE(SUM(CASE WHEN sf.duration_seconds IS NULL THEN 1 ELSE 0 END), 0)
                AS unknown_entries
        FROM playlist_entries pe
        LEFT JOIN song_files sf ON sf.song_id = pe.song_id
        WHERE pe.playlist_id = ?
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(DurationTally {
        known_seconds: row.get::<i64, _>("known_seconds") as u64,
        unknown_entries: row.get::<i64, _>("unknown_entries") as u64,
    })
}

/// Highest assigned position, 0 for an empty playlist
pub async fn max_position(pool: &SqlitePool, id: PlaylistId) -> Result<u32> {
    ensure_exists(pool, id).await?;

    let max: i64 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(position), 0) FROM playlist_entries WHERE playlist_id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(max as u32)
}

/// Insert an entry at an explicit position
///
/// The `(playlist_id, position)` uniqueness constraint turns a lost race
/// into `PositionConflict`.
pub async fn append_entry(
    pool: &SqlitePool,
    id: PlaylistId,
    song_id: SongId,
    position: u32,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        INSERT INTO playlist_entries (playlist_id, song_id, position)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(song_id)
    .bind(i64::from(position))
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(StationError::PositionConflict {
                playlist_id: id,
                position,
            })
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
            ensure_exists(pool, id).await?;
            Err(StationError::SongNotFound(song_id))
        }
        Err(e) => Err(e.into()),
    }
}

/// Entries joined with song metadata, by ascending position
pub async fn list_entries_ordered(
    pool: &SqlitePool,
    id: PlaylistId,
) -> Result<Vec<PlaylistEntryView>> {
    ensure_exists(pool, id).await?;

    let rows = sqlx::query(
        r#"
        SELECT pe.position, s.id AS song_id, s.title, s.artist, s.album, sf.duration_seconds
        FROM playlist_entries pe
        INNER JOIN songs s ON s.id = pe.song_id
        LEFT JOIN song_files sf ON sf.song_id = s.id
        WHERE pe.playlist_id = ?
        ORDER BY pe.position
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistEntryView {
            position: row.get::<i64, _>("position") as u32,
            song_id: row.get("song_id"),
            title: row.get("title"),
            artist: row.get("artist"),
            album: row.get("album"),
            duration_seconds: row
                .get::<Option<i64>, _>("duration_seconds")
                .map(|d| d as u32),
        })
        .collect())
}

// Helper functions

async fn ensure_exists(pool: &SqlitePool, id: PlaylistId) -> Result<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(StationError::PlaylistNotFound(id)),
    }
}
