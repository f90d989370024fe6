use crate::{like_pattern, tags};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use station_core::{error::Result, NewSong, Song, SongFile, SongId, SongQuery, SongView, StationError};
use std::path::PathBuf;

/// Separator used when aggregating tag names in a single column
const TAG_SEPARATOR: char = '\u{1f}';

/// Register a song, its file record and its tags in one transaction
///
/// A file whose hash is already catalogued fails with `Duplicate` and
/// leaves nothing behind.
pub async fn create(pool: &SqlitePool, song: NewSong) -> Result<SongId> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO songs (title, artist, album, genre, year, track_number)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&song.title)
    .bind(&song.artist)
    .bind(&song.album)
    .bind(&song.genre)
    .bind(song.year)
    .bind(song.track_number.map(i64::from))
    .execute(&mut *tx)
    .await?;

    let song_id = SongId::new(result.last_insert_rowid());

    let file_insert = sqlx::query(
        r#"
        INSERT INTO song_files (song_id, duration_seconds, channels, codec, file_path, file_hash)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(song_id)
    .bind(song.duration_seconds.map(i64::from))
    .bind(song.channels.map(i64::from))
    .bind(&song.codec)
    .bind(song.file_path.to_string_lossy().into_owned())
    .bind(&song.file_hash)
    .execute(&mut *tx)
    .await;

    match file_insert {
        Ok(_) => {}
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(StationError::Duplicate(format!(
                "file hash {} already catalogued",
                song.file_hash
            )));
        }
        Err(e) => return Err(e.into()),
    }

    for name in &song.tags {
        let tag_id = tags::get_or_create(&mut *tx, name).await?;
        tags::attach(&mut *tx, song_id, tag_id).await?;
    }

    tx.commit().await?;

    Ok(song_id)
}

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: SongId) -> Result<Option<Song>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, artist, album, genre, year, track_number, created_at
        FROM songs
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Song {
        id: row.get("id"),
        title: row.get("title"),
        artist: row.get("artist"),
        album: row.get("album"),
        genre: row.get("genre"),
        year: row.get::<Option<i64>, _>("year").map(|y| y as i32),
        track_number: row.get::<Option<i64>, _>("track_number").map(|t| t as u32),
        created_at: row.get("created_at"),
    }))
}

/// Get the file record for a song
pub async fn get_file(pool: &SqlitePool, id: SongId) -> Result<Option<SongFile>> {
    let row = sqlx::query(
        r#"
        SELECT song_id, duration_seconds, channels, codec, file_path, file_hash
        FROM song_files
        WHERE song_id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| SongFile {
        song_id: row.get("song_id"),
        duration_seconds: row.get::<Option<i64>, _>("duration_seconds").map(|d| d as u32),
        channels: row.get::<Option<i64>, _>("channels").map(|c| c as u8),
        codec: row.get("codec"),
        file_path: PathBuf::from(row.get::<String, _>("file_path")),
        file_hash: row.get("file_hash"),
    }))
}

/// Duration of a song
///
/// `Ok(None)` when the song exists without a known duration,
/// `SongNotFound` when it does not exist.
pub async fn get_duration(pool: &SqlitePool, id: SongId) -> Result<Option<u32>> {
    let row = sqlx::query(
        r#"
        SELECT sf.duration_seconds
        FROM songs s
        LEFT JOIN song_files sf ON sf.song_id = s.id
        WHERE s.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Err(StationError::SongNotFound(id));
    };

    Ok(row
        .get::<Option<i64>, _>("duration_seconds")
        .map(|d| d as u32))
}

/// Find the song whose file has this content hash
pub async fn find_by_hash(pool: &SqlitePool, file_hash: &str) -> Result<Option<SongId>> {
    let id = sqlx::query_scalar("SELECT song_id FROM song_files WHERE file_hash = ?")
        .bind(file_hash)
        .fetch_optional(pool)
        .await?;

    Ok(id)
}

/// Search the catalog
///
/// Text filters match substrings, the tag filter matches a tag name
/// exactly, the year range is inclusive. Results are ordered by artist,
/// album, title.
pub async fn search(pool: &SqlitePool, query: &SongQuery) -> Result<Vec<SongView>> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        r#"
        SELECT
            s.id, s.title, s.artist, s.album, s.year,
            sf.duration_seconds,
            (
                SELECT GROUP_CONCAT(t.name, char(31))
                FROM song_tags st
                INNER JOIN tags t ON t.id = st.tag_id
                WHERE st.song_id = s.id
            ) AS tags
        FROM songs s
        LEFT JOIN song_files sf ON sf.song_id = s.id
        WHERE 1 = 1
        "#,
    );

    if let Some(title) = &query.title {
        qb.push(" AND s.title LIKE ")
            .push_bind(like_pattern(title))
            .push(" ESCAPE '\\'");
    }
    if let Some(artist) = &query.artist {
        qb.push(" AND s.artist LIKE ")
            .push_bind(like_pattern(artist))
            .push(" ESCAPE '\\'");
    }
    if let Some(album) = &query.album {
        qb.push(" AND s.album LIKE ")
            .push_bind(like_pattern(album))
            .push(" ESCAPE '\\'");
    }
    if let Some(tag) = &query.tag {
        qb.push(
            " AND EXISTS (SELECT 1 FROM song_tags st INNER JOIN tags t ON t.id = st.tag_id \
             WHERE st.song_id = s.id AND t.name = ",
        )
        .push_bind(tag.clone())
        .push(")");
    }
    if let Some(years) = query.years {
        qb.push(" AND s.year BETWEEN ")
            .push_bind(years.from)
            .push(" AND ")
            .push_bind(years.to);
    }

    qb.push(" ORDER BY s.artist, s.album, s.title, s.id LIMIT ")
        .push_bind(i64::from(query.limit));

    let rows = qb.build().fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let mut tags: Vec<String> = row
                .get::<Option<String>, _>("tags")
                .map(|joined| joined.split(TAG_SEPARATOR).map(str::to_string).collect())
                .unwrap_or_default();
            tags.sort();

            SongView {
                song_id: row.get("id"),
                title: row.get("title"),
                artist: row.get("artist"),
                album: row.get("album"),
                year: row.get::<Option<i64>, _>("year").map(|y| y as i32),
                duration_seconds: row
                    .get::<Option<i64>, _>("duration_seconds")
                    .map(|d| d as u32),
                tags,
            }
        })
        .collect())
}
