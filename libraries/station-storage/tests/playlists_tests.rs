//! Integration tests for the playlists vertical slice
//!
//! Tests playlist operations including:
//! - Creation and lookup
//! - Duration tallies with unknown durations
//! - Position uniqueness (lost-update detection)
//! - Missing playlist vs. empty playlist


use station_core::{CatalogLookup, DurationTally, PlaylistId, PlaylistStore, SongId, StationError};
use station_storage::{playlists, LocalStorageContext};
use test_helpers::*;

#[tokio::test]
async fn test_create_and_get_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let id = playlists::create(pool, "Morning Show", "Monday", 1800)
        .await
        .expect("Failed to create playlist");

    let playlist = playlists::get_by_id(pool, id).await.unwrap().unwrap();
    assert_eq!(playlist.id, id);
    assert_eq!(playlist.show_name, "Morning Show");
    assert_eq!(playlist.playlist_name, "Monday");
    assert_eq!(playlist.max_duration_seconds, 1800);

    assert_eq!(playlists::get_budget(pool, id).await.unwrap(), 1800);
}

#[tokio::test]
async fn test_blank_labels_are_stored_as_given() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let id = playlists::create(pool, "", "   ", 3600).await.unwrap();
    let playlist = playlists::get_by_id(pool, id).await.unwrap().unwrap();

    assert_eq!(playlist.show_name, "");
    assert_eq!(playlist.playlist_name, "   ");
}

#[tokio::test]
async fn test_zero_budget_is_refused() {
    let test_db = TestDb::new().await;

    let result = playlists::create(test_db.pool(), "Show", "Broken", 0).await;
    assert!(matches!(result, Err(StationError::InvalidInput(_))));
    assert!(playlists::get_all(test_db.pool()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_playlist_reads() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let id = playlists::create(pool, "Show", "Empty", 1800).await.unwrap();

    assert_eq!(
        playlists::sum_entry_durations(pool, id).await.unwrap(),
        DurationTally::default()
    );
    assert_eq!(playlists::max_position(pool, id).await.unwrap(), 0);
    assert!(playlists::list_entries_ordered(pool, id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_playlist_is_not_found_everywhere() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let missing = PlaylistId::new(999);

    assert!(playlists::get_by_id(pool, missing).await.unwrap().is_none());
    assert!(matches!(
        playlists::get_budget(pool, missing).await,
        Err(StationError::PlaylistNotFound(id)) if id == missing
    ));
    assert!(matches!(
        playlists::sum_entry_durations(pool, missing).await,
        Err(StationError::PlaylistNotFound(_))
    ));
    assert!(matches!(
        playlists::max_position(pool, missing).await,
        Err(StationError::PlaylistNotFound(_))
    ));
    assert!(matches!(
        playlists::list_entries_ordered(pool, missing).await,
        Err(StationError::PlaylistNotFound(_))
    ));
}

#[tokio::test]
async fn test_entries_are_listed_by_position() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let id = playlists::create(pool, "Show", "Ordered", 3600).await.unwrap();
    let a = create_test_song(pool, "A", Some(100)).await;
    let b = create_test_song(pool, "B", Some(200)).await;
    let c = create_test_song(pool, "C", None).await;

    // Insert out of order; the read path sorts by position
    playlists::append_entry(pool, id, b, 2).await.unwrap();
    playlists::append_entry(pool, id, a, 1).await.unwrap();
    playlists::append_entry(pool, id, c, 5).await.unwrap();

    let entries = playlists::list_entries_ordered(pool, id).await.unwrap();
    let order: Vec<(u32, SongId)> = entries.iter().map(|e| (e.position, e.song_id)).collect();
    assert_eq!(order, vec![(1, a), (2, b), (5, c)]);

    assert_eq!(entries[0].title, "A");
    assert_eq!(entries[0].artist, "Test Artist");
    assert_eq!(entries[0].duration_seconds, Some(100));
    assert_eq!(entries[2].duration_seconds, None);

    assert_eq!(playlists::max_position(pool, id).await.unwrap(), 5);
}

#[tokio::test]
async fn test_tally_counts_unknown_durations_separately() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let id = playlists::create(pool, "Show", "Tally", 3600).await.unwrap();
    let a = create_test_song(pool, "A", Some(300)).await;
    let b = create_test_song(pool, "B", None).await;
    let c = create_test_song(pool, "C", Some(45)).await;

    playlists::append_entry(pool, id, a, 1).await.unwrap();
    playlists::append_entry(pool, id, b, 2).await.unwrap();
    playlists::append_entry(pool, id, c, 3).await.unwrap();

    assert_eq!(
        playlists::sum_entry_durations(pool, id).await.unwrap(),
        DurationTally {
            known_seconds: 345,
            unknown_entries: 1,
        }
    );
}

#[tokio::test]
async fn test_same_song_may_appear_twice() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let id = playlists::create(pool, "Show", "Repeat", 3600).await.unwrap();
    let song = create_test_song(pool, "Jingle", Some(10)).await;

    playlists::append_entry(pool, id, song, 1).await.unwrap();
    playlists::append_entry(pool, id, song, 2).await.unwrap();

    let tally = playlists::sum_entry_durations(pool, id).await.unwrap();
    assert_eq!(tally.known_seconds, 20);
}

#[tokio::test]
async fn test_taken_position_is_a_conflict() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let id = playlists::create(pool, "Show", "Race", 3600).await.unwrap();
    let a = create_test_song(pool, "A", Some(100)).await;
    let b = create_test_song(pool, "B", Some(100)).await;

    playlists::append_entry(pool, id, a, 1).await.unwrap();
    let result = playlists::append_entry(pool, id, b, 1).await;

    match result {
        Err(StationError::PositionConflict {
            playlist_id,
            position,
        }) => {
            assert_eq!(playlist_id, id);
            assert_eq!(position, 1);
        }
        other => panic!("expected PositionConflict, got {other:?}"),
    }

    // The losing write left nothing behind
    let entries = playlists::list_entries_ordered(pool, id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].song_id, a);
}

#[tokio::test]
async fn test_append_unknown_song_or_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let id = playlists::create(pool, "Show", "Refs", 3600).await.unwrap();
    let song = create_test_song(pool, "A", Some(100)).await;

    assert!(matches!(
        playlists::append_entry(pool, id, SongId::new(12345), 1).await,
        Err(StationError::SongNotFound(_))
    ));
    assert!(matches!(
        playlists::append_entry(pool, PlaylistId::new(999), song, 1).await,
        Err(StationError::PlaylistNotFound(_))
    ));
}

#[tokio::test]
async fn test_context_implements_collaborator_traits() {
    let test_db = TestDb::new().await;
    let storage = LocalStorageContext::new(test_db.pool().clone());

    let id = storage.create("Late Night", "Friday", 7200).await.unwrap();
    let song = create_test_song(test_db.pool(), "A", Some(240)).await;
    let unknown = create_test_song(test_db.pool(), "B", None).await;

    assert_eq!(storage.get_playlist(id).await.unwrap().max_duration_seconds, 7200);
    assert_eq!(storage.list_playlists().await.unwrap().len(), 1);
    assert_eq!(storage.get_song_duration(song).await.unwrap(), Some(240));
    assert_eq!(storage.get_song_duration(unknown).await.unwrap(), None);
    assert!(matches!(
        storage.get_song_duration(SongId::new(999)).await,
        Err(StationError::SongNotFound(_))
    ));
    assert!(matches!(
        storage.get_playlist(PlaylistId::new(999)).await,
        Err(StationError::PlaylistNotFound(_))
    ));
}
