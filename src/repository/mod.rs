use std::sync::Arc;

use tracing::warn;

use crate::cache::NotesCache;
use crate::error::StoreError;
use crate::note::Note;
use crate::remote::RemoteSource;
use crate::store::NoteStore;

/// Single entry point for all note access.
///
/// Composes the durable store, the in-memory cache, and the (inert) remote
/// source. The repository itself is stateless: state lives in the store
/// (durable) and the cache (ephemeral), and each call is a single attempt
/// with no retry.
pub struct NotesRepository<S: NoteStore> {
    store: Arc<S>,
    cache: Arc<NotesCache>,
    #[allow(dead_code)]
    remote: RemoteSource,
}

impl<S: NoteStore> NotesRepository<S> {
    pub fn new(store: Arc<S>, cache: Arc<NotesCache>, remote: RemoteSource) -> Self {
        Self {
            store,
            cache,
            remote,
        }
    }

    /// Full listing, most recently updated first.
    ///
    /// The cache snapshot is taken before the store is queried, so a
    /// failure can only ever fall back to state at least as old as the
    /// call's start. On success the fetched list is upserted into the
    /// cache without evicting ids the list does not mention; a stale
    /// upstream must not be able to erase cached notes. On failure the
    /// snapshot is returned as a successful result: list views trade
    /// staleness for availability, and the store error is logged rather
    /// than surfaced.
    pub async fn fetch_notes(&self) -> Result<Vec<Note>, StoreError> {
        let cached_snapshot = self.cache.get_all();

        match self.store.fetch_all().await {
            Ok(notes) => {
                self.cache.put_all(notes.clone());
                Ok(notes)
            }
            Err(err) => {
                warn!(error = %err, "store fetch failed, serving cached snapshot");
                Ok(cached_snapshot)
            }
        }
    }

    /// Single-note lookup, straight from the store.
    ///
    /// No cache read-through and no fallback here: a detail view must see
    /// real failures instead of a silently stale copy.
    pub async fn fetch_note(&self, id: &str) -> Result<Option<Note>, StoreError> {
        self.store.fetch_by_id(id).await
    }

    /// Persist a note and mirror the store-authoritative result into the
    /// cache. A failed save leaves the cache untouched; there is no
    /// speculative write.
    pub async fn save_note(&self, note: Note) -> Result<Note, StoreError> {
        let persisted = self.store.save(note).await?;
        self.cache.put(persisted.clone());
        Ok(persisted)
    }

    /// Delete from the store, then drop the id from the cache. If the
    /// store delete fails the cached copy stays: the record still exists.
    pub async fn delete_note(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(id).await?;
        self.cache.remove(id);
        Ok(())
    }

    /// Substring search, straight from the store. Search results never
    /// warm the cache. A blank query means "no filter" and delegates to
    /// the full listing.
    pub async fn search_notes(&self, query: &str) -> Result<Vec<Note>, StoreError> {
        if query.trim().is_empty() {
            return self.store.fetch_all().await;
        }

        self.store.search(query).await
    }
}
