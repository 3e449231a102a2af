pub mod cache;
pub mod cli;
pub mod error;
pub mod note;
pub mod remote;
pub mod repository;
pub mod store;

pub use cache::NotesCache;
pub use error::{LeafletError, Result, StoreError};
pub use note::Note;
pub use remote::RemoteSource;
pub use repository::NotesRepository;
pub use store::{NoteStore, SqliteStore};
