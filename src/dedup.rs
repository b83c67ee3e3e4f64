use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;

/// Identical create bodies seen within this window count as one submission.
pub const DEDUP_WINDOW: Duration = Duration::from_millis(2000);
/// Entries older than this are swept on every admission.
pub const ENTRY_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First sighting (or outside the window); the caller should insert.
    Fresh,
    /// Same key seen less than [`DEDUP_WINDOW`] ago; the caller should not insert.
    Duplicate,
}

/// Remembers recently submitted create bodies.
///
/// Best effort: implementations need not survive restarts, and the in-memory
/// one is not shared between server instances.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn admit(&self, key: &str, now: Instant) -> Admission;

    /// Forgets `key`, so a retry after a failed insert is not swallowed.
    async fn release(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct InMemorySubmissionStore {
    seen: Mutex<HashMap<String, Instant>>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn admit_sync(&self, key: &str, now: Instant) -> Admission {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);

        seen.retain(|_, last_seen| now.saturating_duration_since(*last_seen) <= ENTRY_TTL);

        if let Some(last_seen) = seen.get(key) {
            if now.saturating_duration_since(*last_seen) < DEDUP_WINDOW {
                return Admission::Duplicate;
            }
        }

        seen.insert(key.to_string(), now);
        Admission::Fresh
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn admit(&self, key: &str, now: Instant) -> Admission {
        self.admit_sync(key, now)
    }

    async fn release(&self, key: &str) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;

    static BASE: LazyLock<Instant> = LazyLock::new(Instant::now);

    fn at(ms: u64) -> Instant {
        *BASE + Duration::from_millis(ms)
    }

    #[tokio::test]
    async fn same_key_inside_window_is_duplicate() {
        let store = InMemorySubmissionStore::new();
        assert_eq!(store.admit("a", at(0)).await, Admission::Fresh);
        assert_eq!(store.admit("a", at(1999)).await, Admission::Duplicate);
    }

    #[tokio::test]
    async fn same_key_after_window_is_fresh() {
        let store = InMemorySubmissionStore::new();
        assert_eq!(store.admit("a", at(0)).await, Admission::Fresh);
        assert_eq!(store.admit("a", at(2000)).await, Admission::Fresh);
        assert_eq!(store.admit("a", at(2500)).await, Admission::Duplicate);
    }

    #[tokio::test]
    async fn duplicate_does_not_extend_window() {
        let store = InMemorySubmissionStore::new();
        store.admit("a", at(0)).await;
        assert_eq!(store.admit("a", at(1500)).await, Admission::Duplicate);
        assert_eq!(store.admit("a", at(2100)).await, Admission::Fresh);
    }

    #[tokio::test]
    async fn different_keys_do_not_interfere() {
        let store = InMemorySubmissionStore::new();
        assert_eq!(store.admit("a", at(0)).await, Admission::Fresh);
        assert_eq!(store.admit("b", at(10)).await, Admission::Fresh);
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }

    #[tokio::test]
    async fn stale_entries_are_swept_on_any_admission() {
        let store = InMemorySubmissionStore::new();
        store.admit("a", at(0)).await;
        store.admit("b", at(1000)).await;

        store.admit("c", at(5500)).await;

        let seen = store.seen.lock().unwrap();
        assert!(!seen.contains_key("a"));
        assert!(seen.contains_key("b"));
        assert!(seen.contains_key("c"));
    }

    #[tokio::test]
    async fn sweep_runs_on_duplicates_too() {
        let store = InMemorySubmissionStore::new();
        store.admit("old", at(0)).await;
        store.admit("x", at(4000)).await;

        assert_eq!(store.admit("x", at(5001)).await, Admission::Duplicate);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn released_key_is_fresh_again() {
        let store = InMemorySubmissionStore::new();
        assert_eq!(store.admit("a", at(0)).await, Admission::Fresh);
        store.release("a").await;
        assert!(store.is_empty());
        assert_eq!(store.admit("a", at(100)).await, Admission::Fresh);
    }

    #[tokio::test]
    async fn earlier_instant_does_not_poison_the_map() {
        let store = InMemorySubmissionStore::new();
        store.admit("a", at(3000)).await;
        // An out-of-order instant counts as zero elapsed: still a duplicate, no sweep.
        assert_eq!(store.admit("a", at(1000)).await, Admission::Duplicate);
        assert_eq!(store.admit("a", at(5000)).await, Admission::Fresh);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_identical_submissions_admit_once() {
        let store = std::sync::Arc::new(InMemorySubmissionStore::new());
        let now = at(0);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.admit("same", now).await })
            })
            .collect();

        let mut fresh = 0;
        for handle in handles {
            if handle.await.unwrap() == Admission::Fresh {
                fresh += 1;
            }
        }
        assert_eq!(fresh, 1);
    }
}
