use sqlx::{SqliteConnection, SqlitePool};
use station_core::{error::Result, SongId, TagId};

/// Get a tag id by exact name, creating the tag if needed
pub async fn get_or_create(conn: &mut SqliteConnection, name: &str) -> Result<TagId> {
    let existing: Option<TagId> = sqlx::query_scalar("SELECT id FROM tags WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let result = sqlx::query("INSERT INTO tags (name) VALUES (?)")
        .bind(name)
        .execute(&mut *conn)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Attach a tag to a song; attaching twice is a no-op
pub async fn attach(conn: &mut SqliteConnection, song_id: SongId, tag_id: TagId) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO song_tags (song_id, tag_id)
        VALUES (?, ?)
        ON CONFLICT(song_id, tag_id) DO NOTHING
        "#,
    )
    .bind(song_id)
    .bind(tag_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Tag names attached to a song, alphabetically
pub async fn get_for_song(pool: &SqlitePool, song_id: SongId) -> Result<Vec<String>> {
    let names = sqlx::query_scalar(
        r#"
        SELECT t.name
        FROM song_tags st
        INNER JOIN tags t ON t.id = st.tag_id
        WHERE st.song_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(song_id)
    .fetch_all(pool)
    .await?;

    Ok(names)
}

/// All tag names, alphabetically
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<String>> {
    let names = sqlx::query_scalar("SELECT name FROM tags ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(names)
}
