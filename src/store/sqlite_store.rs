use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::sync::Mutex;
use tracing::debug;

use super::NoteStore;
use crate::error::StoreError;
use crate::note::Note;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS notes (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    tags TEXT NOT NULL DEFAULT '[]',
    is_important INTEGER NOT NULL DEFAULT 0,
    is_archived INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_notes_updated_at ON notes(updated_at);
";

const NOTE_COLUMNS: &str =
    "id, title, content, tags, is_important, is_archived, created_at, updated_at";

/// SQLite-backed note store.
///
/// One `notes` table keyed by id. Timestamps are stored as fixed-width
/// RFC 3339 text (microsecond precision, UTC), which sorts
/// chronologically, and ties on `updated_at` fall back to rowid so listing
/// order is stable. Tags are a JSON array column and are matched per-tag
/// during search via `json_each`.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the database at `path`, creating parent directories
    /// as needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        debug!(path = %path.display(), "opened note store");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Default database location under the platform data directory.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let data_dir = dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
            .ok_or_else(|| {
                StoreError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    "could not determine data directory",
                ))
            })?;

        Ok(data_dir.join("leaflet").join("notes.db"))
    }
}

#[async_trait]
impl NoteStore for SqliteStore {
    async fn fetch_all(&self) -> Result<Vec<Note>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM notes ORDER BY updated_at DESC, rowid ASC",
            NOTE_COLUMNS
        ))?;

        let notes = stmt
            .query_map([], row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Note>, StoreError> {
        let conn = self.conn.lock().await;
        let note = conn
            .query_row(
                &format!("SELECT {} FROM notes WHERE id = ?1", NOTE_COLUMNS),
                [id],
                row_to_note,
            )
            .optional()?;

        Ok(note)
    }

    async fn save(&self, note: Note) -> Result<Note, StoreError> {
        let conn = self.conn.lock().await;

        let existing: Option<(DateTime<Utc>, DateTime<Utc>)> = conn
            .query_row(
                "SELECT created_at, updated_at FROM notes WHERE id = ?1",
                [&note.id],
                |row| Ok((column_timestamp(row, 0)?, column_timestamp(row, 1)?)),
            )
            .optional()?;

        // Microsecond precision matches the stored text representation, so
        // the value handed back equals the value read back later.
        let mut stamp = Utc::now().trunc_subsecs(6);
        let created_at = match existing {
            Some((created, prev_updated)) => {
                if stamp <= prev_updated {
                    stamp = prev_updated + Duration::microseconds(1);
                }
                created
            }
            None => {
                let created = note.created_at.trunc_subsecs(6);
                if stamp < created {
                    stamp = created;
                }
                created
            }
        };

        let persisted = Note {
            created_at,
            updated_at: stamp,
            ..note
        };

        conn.execute(
            "INSERT INTO notes (id, title, content, tags, is_important, is_archived, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                 title = excluded.title,
                 content = excluded.content,
                 tags = excluded.tags,
                 is_important = excluded.is_important,
                 is_archived = excluded.is_archived,
                 updated_at = excluded.updated_at",
            params![
                persisted.id,
                persisted.title,
                persisted.content,
                serde_json::to_string(&persisted.tags)?,
                persisted.is_important,
                persisted.is_archived,
                format_timestamp(persisted.created_at),
                format_timestamp(persisted.updated_at),
            ],
        )?;

        Ok(persisted)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM notes WHERE id = ?1", [id])?;
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<Note>, StoreError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();

        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM notes
             WHERE instr(lower(title), ?1) > 0
                OR instr(lower(content), ?1) > 0
                OR EXISTS (
                    SELECT 1 FROM json_each(notes.tags)
                    WHERE instr(lower(json_each.value), ?1) > 0
                )
             ORDER BY updated_at DESC, rowid ASC",
            NOTE_COLUMNS
        ))?;

        let notes = stmt
            .query_map([&needle], row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn column_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    let tags_json: String = row.get(3)?;
    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        tags,
        is_important: row.get(4)?,
        is_archived: row.get(5)?,
        created_at: column_timestamp(row, 6)?,
        updated_at: column_timestamp(row, 7)?,
    })
}
