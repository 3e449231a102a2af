use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single note record.
///
/// `id` is generated client-side and never changes; `created_at` is stamped
/// once at construction. `updated_at` is refreshed by the store on every
/// successful save, so `created_at <= updated_at` always holds for a
/// persisted note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_important: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            content,
            tags: Vec::new(),
            is_important: false,
            is_archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when both title and content are blank after trimming.
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }

    /// First line's worth of content for list rendering, capped at 100 chars.
    pub fn preview(&self) -> String {
        const MAX_LEN: usize = 100;
        let trimmed = self.content.trim();
        if trimmed.chars().count() <= MAX_LEN {
            trimmed.to_string()
        } else {
            let cut: String = trimmed.chars().take(MAX_LEN).collect();
            format!("{}...", cut)
        }
    }
}
