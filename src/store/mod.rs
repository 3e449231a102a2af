mod sqlite_store;

pub use sqlite_store::SqliteStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::note::Note;

/// Access contract for the durable note store.
///
/// Implementations own the on-disk representation. All results that carry
/// more than one note are ordered by `updated_at` descending, with ties
/// broken by insertion order so repeated calls agree.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Every stored note, most recently updated first.
    async fn fetch_all(&self) -> Result<Vec<Note>, StoreError>;

    /// A single note, or `None` if no record has that id.
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Note>, StoreError>;

    /// Upsert by id. Stamps `updated_at` as part of the operation and
    /// returns the persisted value; `created_at` of an existing record is
    /// preserved.
    async fn save(&self, note: Note) -> Result<Note, StoreError>;

    /// Remove the record with this id. Deleting a nonexistent id is Ok.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Case-insensitive substring match against title, content, or any tag.
    /// An empty query matches nothing; callers wanting "no filter" use
    /// `fetch_all` instead.
    async fn search(&self, query: &str) -> Result<Vec<Note>, StoreError>;
}
