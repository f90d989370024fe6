//! Integration tests for the songs and tags vertical slices
//!
//! Tests catalog operations including:
//! - Transactional registration (song + file + tags)
//! - Hash-based duplicate detection
//! - Filtered search (text, tag, year range, limit)


use station_core::{SongQuery, StationError};
use station_storage::{songs, tags};
use test_helpers::*;

async fn seed_catalog(pool: &sqlx::SqlitePool) {
    let mut song = new_song("So What", "Miles Davis", Some(562));
    song.album = Some("Kind of Blue".to_string());
    song.year = Some(1959);
    song.tags = vec!["Jazz".to_string(), "Modal".to_string()];
    songs::create(pool, song).await.unwrap();

    let mut song = new_song("Feeling Good", "Nina Simone", Some(177));
    song.album = Some("I Put a Spell on You".to_string());
    song.year = Some(1965);
    song.tags = vec!["Jazz".to_string(), "Soul".to_string()];
    songs::create(pool, song).await.unwrap();

    let mut song = new_song("Superstition", "Stevie Wonder", Some(245));
    song.album = Some("Talking Book".to_string());
    song.year = Some(1972);
    song.tags = vec!["Funk".to_string()];
    songs::create(pool, song).await.unwrap();

    let mut song = new_song("100% Pure", "Test_Artist", None);
    song.year = None;
    songs::create(pool, song).await.unwrap();
}

#[tokio::test]
async fn test_create_song_with_file_and_tags() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let mut song = new_song("Blue in Green", "Miles Davis", Some(337));
    song.album = Some("Kind of Blue".to_string());
    song.genre = Some("Jazz, Modal".to_string());
    song.year = Some(1959);
    song.track_number = Some(3);
    song.tags = vec!["Jazz".to_string(), "Modal".to_string()];
    let hash = song.file_hash.clone();

    let id = songs::create(pool, song).await.expect("Failed to create song");

    let stored = songs::get_by_id(pool, id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Blue in Green");
    assert_eq!(stored.artist, "Miles Davis");
    assert_eq!(stored.album.as_deref(), Some("Kind of Blue"));
    assert_eq!(stored.genre.as_deref(), Some("Jazz, Modal"));
    assert_eq!(stored.year, Some(1959));
    assert_eq!(stored.track_number, Some(3));

    let file = songs::get_file(pool, id).await.unwrap().unwrap();
    assert_eq!(file.duration_seconds, Some(337));
    assert_eq!(file.channels, Some(2));
    assert_eq!(file.file_hash, hash);

    assert_eq!(
        tags::get_for_song(pool, id).await.unwrap(),
        vec!["Jazz".to_string(), "Modal".to_string()]
    );
    assert_eq!(songs::find_by_hash(pool, &hash).await.unwrap(), Some(id));
}

#[tokio::test]
async fn test_duplicate_hash_rolls_back() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let first = new_song("Original", "Artist", Some(100));
    let mut copy = new_song("Copy", "Artist", Some(100));
    copy.file_hash = first.file_hash.clone();
    copy.tags = vec!["Orphan".to_string()];

    songs::create(pool, first).await.unwrap();
    let result = songs::create(pool, copy).await;
    assert!(matches!(result, Err(StationError::Duplicate(_))));

    // Neither the song row nor its tags survived
    let all = songs::search(pool, &SongQuery::new()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Original");
    assert!(tags::get_all(pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_tags_are_shared_between_songs() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    seed_catalog(pool).await;

    assert_eq!(
        tags::get_all(pool).await.unwrap(),
        vec!["Funk", "Jazz", "Modal", "Soul"]
    );
}

#[tokio::test]
async fn test_search_without_filters_orders_by_artist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    seed_catalog(pool).await;

    let results = songs::search(pool, &SongQuery::new()).await.unwrap();
    let artists: Vec<&str> = results.iter().map(|s| s.artist.as_str()).collect();
    assert_eq!(
        artists,
        vec!["Miles Davis", "Nina Simone", "Stevie Wonder", "Test_Artist"]
    );
    assert_eq!(results[0].tags, vec!["Jazz", "Modal"]);
    assert!(results[3].tags.is_empty());
    assert_eq!(results[3].duration_seconds, None);
}

#[tokio::test]
async fn test_search_by_text_is_substring() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    seed_catalog(pool).await;

    let results = songs::search(pool, &SongQuery::new().title("feel"))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Feeling Good");

    let results = songs::search(pool, &SongQuery::new().album("Blue"))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].artist, "Miles Davis");
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    seed_catalog(pool).await;

    let results = songs::search(pool, &SongQuery::new().title("100%"))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);

    // "_" must not match any single character
    let results = songs::search(pool, &SongQuery::new().artist("Miles_Davis"))
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_by_tag_keeps_all_tags() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    seed_catalog(pool).await;

    let results = songs::search(pool, &SongQuery::new().tag("Jazz"))
        .await
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].artist, "Nina Simone");
    assert_eq!(results[1].tags, vec!["Jazz", "Soul"]);

    let results = songs::search(pool, &SongQuery::new().tag("jaz"))
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_by_year_range_is_inclusive() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    seed_catalog(pool).await;

    let results = songs::search(pool, &SongQuery::new().years(1959, 1965))
        .await
        .unwrap();
    let titles: Vec<&str> = results.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["So What", "Feeling Good"]);
}

#[tokio::test]
async fn test_search_combines_filters_and_limit() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    seed_catalog(pool).await;

    let results = songs::search(pool, &SongQuery::new().tag("Jazz").years(1960, 1980))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Feeling Good");

    let results = songs::search(pool, &SongQuery::new().limit(2)).await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_duration_lookup() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let known = create_test_song(pool, "Known", Some(200)).await;
    let unknown = create_test_song(pool, "Unknown", None).await;

    assert_eq!(songs::get_duration(pool, known).await.unwrap(), Some(200));
    assert_eq!(songs::get_duration(pool, unknown).await.unwrap(), None);
    assert!(matches!(
        songs::get_duration(pool, station_core::SongId::new(404)).await,
        Err(StationError::SongNotFound(_))
    ));
}
