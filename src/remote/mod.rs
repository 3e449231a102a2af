use crate::error::StoreError;
use crate::note::Note;

/// Boundary to a future sync backend.
///
/// Inert in this version: fetches return nothing and saves echo their
/// input, so the remote can never contradict local state. The repository
/// holds one as a reserved hook but does not consult it on any path.
#[derive(Debug, Default)]
pub struct RemoteSource;

impl RemoteSource {
    pub fn new() -> Self {
        Self
    }

    pub async fn fetch_notes(&self) -> Result<Vec<Note>, StoreError> {
        Ok(Vec::new())
    }

    pub async fn save_note(&self, note: Note) -> Result<Note, StoreError> {
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_notes_is_empty() {
        let remote = RemoteSource::new();
        assert!(remote.fetch_notes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_note_echoes_input() {
        let remote = RemoteSource::new();
        let note = Note::new("Echo".to_string(), "body".to_string());
        let returned = remote.save_note(note.clone()).await.unwrap();
        assert_eq!(returned, note);
    }
}
