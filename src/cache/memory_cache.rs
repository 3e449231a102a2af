use std::collections::HashMap;
use std::sync::RwLock;

use crate::note::Note;

/// In-memory cache of the most recently seen copy of each note.
///
/// Pure acceleration structure: its contents are always a subset of the
/// last known-good store state and it may be dropped and rebuilt at any
/// time. Reads share the lock, writes are exclusive and atomic per call,
/// and nothing in here ever touches I/O, so no operation can fail.
#[derive(Debug, Default)]
pub struct NotesCache {
    notes: RwLock<HashMap<String, Note>>,
}

impl NotesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point-in-time snapshot of everything cached, most recently updated
    /// first (ties broken by id so the order is stable).
    pub fn get_all(&self) -> Vec<Note> {
        let notes = self.notes.read().expect("cache lock poisoned");
        let mut snapshot: Vec<Note> = notes.values().cloned().collect();
        snapshot.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        snapshot
    }

    pub fn get_by_id(&self, id: &str) -> Option<Note> {
        let notes = self.notes.read().expect("cache lock poisoned");
        notes.get(id).cloned()
    }

    /// Upsert by id; last writer wins.
    pub fn put(&self, note: Note) {
        let mut notes = self.notes.write().expect("cache lock poisoned");
        notes.insert(note.id.clone(), note);
    }

    /// Batched upsert under a single write guard.
    pub fn put_all(&self, batch: Vec<Note>) {
        let mut notes = self.notes.write().expect("cache lock poisoned");
        for note in batch {
            notes.insert(note.id.clone(), note);
        }
    }

    pub fn remove(&self, id: &str) {
        let mut notes = self.notes.write().expect("cache lock poisoned");
        notes.remove(id);
    }

    pub fn clear(&self) {
        let mut notes = self.notes.write().expect("cache lock poisoned");
        notes.clear();
    }

    pub fn len(&self) -> usize {
        let notes = self.notes.read().expect("cache lock poisoned");
        notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
