//! Persisted, deduplicated favorites.
//!
//! [`FavoritesStore`] is the single source of truth for "is this video
//! favorited". It loads the `favorites` key once, then applies every
//! mutation write-through: the candidate set is persisted first and only
//! committed to memory once the write succeeded, so a failed write leaves
//! both copies at the previous state.
//!
//! Mutations hold the store lock across compute, persist and commit. Two
//! screens sharing one store therefore never derive their next state from
//! a stale snapshot.

use std::sync::Arc;

use settee_model::{FAVORITES_KEY, FavoriteChange, FavoriteSet, Video, VideoId};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{error::Result, ports::KeyValueStore};

#[derive(Debug)]
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    current: Mutex<FavoriteSet>,
}

/// Result of [`FavoritesStore::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub change: FavoriteChange,
    pub is_favorite: bool,
}

impl FavoritesStore {
    /// Load the persisted set and build a store around it.
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let current = load(store.as_ref()).await;
        Self {
            store,
            current: Mutex::new(current),
        }
    }

    pub async fn is_favorite(&self, id: &VideoId) -> bool {
        self.current.lock().await.contains(id)
    }

    pub async fn snapshot(&self) -> FavoriteSet {
        self.current.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.current.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.current.lock().await.is_empty()
    }

    pub async fn add(&self, video: Video) -> Result<FavoriteChange> {
        self.mutate(|set| set.with_added(video)).await
    }

    pub async fn remove(&self, id: &VideoId) -> Result<FavoriteChange> {
        self.mutate(|set| set.without(id)).await
    }

    /// Flip membership of `video` based on the committed set.
    pub async fn toggle(&self, video: Video) -> Result<ToggleOutcome> {
        let id = video.id.clone();
        let mut guard = self.current.lock().await;
        let (next, change) = guard.toggled(video);
        self.commit(&mut guard, next, change).await?;
        Ok(ToggleOutcome {
            change,
            is_favorite: guard.contains(&id),
        })
    }

    async fn mutate<F>(&self, op: F) -> Result<FavoriteChange>
    where
        F: FnOnce(&FavoriteSet) -> (FavoriteSet, FavoriteChange),
    {
        let mut guard = self.current.lock().await;
        let (next, change) = op(&*guard);
        self.commit(&mut guard, next, change).await?;
        Ok(change)
    }

    async fn commit(
        &self,
        current: &mut FavoriteSet,
        next: FavoriteSet,
        change: FavoriteChange,
    ) -> Result<()> {
        if change == FavoriteChange::Unchanged {
            return Ok(());
        }
        let encoded = serde_json::to_string(&next)?;
        if let Err(err) = self.store.set(FAVORITES_KEY, &encoded).await {
            warn!(error = %err, ?change, "favorites write failed; keeping previous set");
            return Err(err);
        }
        debug!(?change, count = next.len(), "favorites persisted");
        *current = next;
        Ok(())
    }
}

/// Read the persisted favorites, recovering from any fault.
///
/// An absent key is an empty set. A failed read or a payload that is not a
/// list of video records is discarded and overwritten with an empty list so
/// the same bad payload is never parsed twice. Duplicate ids in an otherwise
/// valid payload are collapsed and the cleaned list is written back.
pub async fn load(store: &dyn KeyValueStore) -> FavoriteSet {
    let raw = match store.get(FAVORITES_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return FavoriteSet::new(),
        Err(err) => {
            warn!(error = %err, "failed to read favorites; resetting");
            reset(store).await;
            return FavoriteSet::new();
        }
    };

    let entries: Vec<Video> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(error = %err, "failed to parse favorites; resetting");
            reset(store).await;
            return FavoriteSet::new();
        }
    };

    let total = entries.len();
    let set = FavoriteSet::from_entries(entries);
    if set.len() != total {
        warn!(
            dropped = total - set.len(),
            "persisted favorites contained duplicate ids; rewriting"
        );
        rewrite(store, &set).await;
    }
    set
}

async fn reset(store: &dyn KeyValueStore) {
    rewrite(store, &FavoriteSet::new()).await;
}

async fn rewrite(store: &dyn KeyValueStore, set: &FavoriteSet) {
    let encoded = match serde_json::to_string(set) {
        Ok(encoded) => encoded,
        Err(err) => {
            warn!(error = %err, "failed to encode favorites");
            return;
        }
    };
    if let Err(err) = store.set(FAVORITES_KEY, &encoded).await {
        warn!(error = %err, "failed to rewrite favorites");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn sample(id: &str) -> Video {
        Video::new(id, "X", format!("https://cdn/{id}.mp4"))
    }

    async fn open_with(raw: Option<&str>) -> (FavoritesStore, MemoryStore) {
        let memory = match raw {
            Some(raw) => MemoryStore::with_entries([(FAVORITES_KEY, raw)]),
            None => MemoryStore::new(),
        };
        let store = FavoritesStore::open(Arc::new(memory.clone())).await;
        (store, memory)
    }

    #[tokio::test]
    async fn absent_key_loads_empty_without_writing() {
        let (store, memory) = open_with(None).await;
        assert!(store.is_empty().await);
        assert_eq!(memory.raw(FAVORITES_KEY), None);
    }

    #[tokio::test]
    async fn corrupt_payloads_are_reset() {
        for raw in ["{not json", "{\"id\":1}", "42", "[{\"title\":\"no id\"}]"] {
            let (store, memory) = open_with(Some(raw)).await;
            assert!(store.is_empty().await, "payload {raw:?}");
            assert_eq!(memory.raw(FAVORITES_KEY).as_deref(), Some("[]"));
        }
    }

    #[tokio::test]
    async fn numeric_ids_are_normalized_on_load() {
        let (store, _) =
            open_with(Some(r#"[{"id":5,"title":"X","videoUrl":"u"}]"#)).await;
        assert!(store.is_favorite(&VideoId::from("5")).await);
    }

    #[tokio::test]
    async fn duplicate_ids_are_collapsed_and_rewritten() {
        let (store, memory) =
            open_with(Some(r#"[{"id":5},{"id":"5"},{"id":6}]"#)).await;
        assert_eq!(store.len().await, 2);

        let rewritten: Vec<Video> =
            serde_json::from_str(&memory.raw(FAVORITES_KEY).unwrap()).unwrap();
        assert_eq!(rewritten.len(), 2);
    }

    #[tokio::test]
    async fn toggle_writes_through() {
        let (store, memory) = open_with(None).await;

        let outcome = store.toggle(sample("5")).await.unwrap();
        assert!(outcome.is_favorite);
        assert_eq!(outcome.change, FavoriteChange::Added);
        let persisted: Vec<Video> =
            serde_json::from_str(&memory.raw(FAVORITES_KEY).unwrap()).unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].id, "5");

        let outcome = store.toggle(sample("5")).await.unwrap();
        assert!(!outcome.is_favorite);
        assert_eq!(memory.raw(FAVORITES_KEY).as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn unchanged_mutations_skip_the_write() {
        let (store, memory) = open_with(None).await;
        store.remove(&VideoId::from("missing")).await.unwrap();
        assert_eq!(memory.raw(FAVORITES_KEY), None);
    }
}
