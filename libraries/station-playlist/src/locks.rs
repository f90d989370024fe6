//! Per-playlist mutual exclusion

use station_core::PlaylistId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Hands out one async lock per playlist
///
/// Admissions against the same playlist queue behind each other; different
/// playlists never contend. Idle entries are dropped on the next acquire.
#[derive(Debug, Default)]
pub struct PlaylistLocks {
    locks: Mutex<HashMap<PlaylistId, Arc<AsyncMutex<()>>>>,
}

impl PlaylistLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `playlist_id`
    pub async fn acquire(&self, playlist_id: PlaylistId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Only the map holds an idle lock; anyone else holding or
            // waiting keeps a clone alive.
            locks.retain(|id, lock| *id == playlist_id || Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(playlist_id).or_default())
        };

        lock.lock_owned().await
    }

    /// Playlists with a live lock entry
    pub fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_playlist_is_exclusive() {
        let locks = Arc::new(PlaylistLocks::new());
        let id = PlaylistId::new(1);

        let guard = locks.acquire(id).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire(id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should get the lock once released")
            .unwrap();
    }

    #[tokio::test]
    async fn different_playlists_do_not_block() {
        let locks = PlaylistLocks::new();

        let _a = locks.acquire(PlaylistId::new(1)).await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(PlaylistId::new(2)))
            .await;

        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn idle_locks_are_pruned() {
        let locks = PlaylistLocks::new();

        for n in 0..10 {
            drop(locks.acquire(PlaylistId::new(n)).await);
        }
        let _held = locks.acquire(PlaylistId::new(100)).await;

        assert_eq!(locks.tracked(), 1);
    }
}
