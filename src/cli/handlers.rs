use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::NotesCache;
use crate::error::{LeafletError, Result};
use crate::note::Note;
use crate::remote::RemoteSource;
use crate::repository::NotesRepository;
use crate::store::SqliteStore;

pub type Repository = NotesRepository<SqliteStore>;

fn open_repository(db: Option<PathBuf>) -> Result<Repository> {
    let path = match db {
        Some(path) => path,
        None => SqliteStore::default_path()?,
    };

    let store = Arc::new(SqliteStore::open(&path)?);
    Ok(NotesRepository::new(
        store,
        Arc::new(NotesCache::new()),
        RemoteSource::new(),
    ))
}

/// Resolve a full UUID or unique prefix against the current listing.
async fn resolve_id(repo: &Repository, id: &str) -> Result<String> {
    let notes = repo.fetch_notes().await.map_err(LeafletError::Store)?;

    notes
        .iter()
        .find(|n| n.id.starts_with(id))
        .map(|n| n.id.clone())
        .ok_or_else(|| LeafletError::NoteNotFound(id.to_string()))
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

/// Append tags, skipping duplicates. Uniqueness is this layer's job, not
/// the entity's.
fn add_tags(existing: &mut Vec<String>, new_tags: Vec<String>) {
    for tag in new_tags {
        if !existing.contains(&tag) {
            existing.push(tag);
        }
    }
}

fn short_id(id: &str) -> &str {
    &id[..8.min(id.len())]
}

fn print_note_line(note: &Note) {
    let marker = if note.is_important { "*" } else { " " };
    let archived = if note.is_archived { " [archived]" } else { "" };
    println!(
        "  ({}) {} {}{}",
        short_id(&note.id),
        marker,
        note.title,
        archived
    );
    let preview = note.preview();
    if !preview.is_empty() {
        println!("      {}", preview);
    }
    if !note.tags.is_empty() {
        println!("      tags: {}", note.tags.join(", "));
    }
}

pub async fn handle_add(
    db: Option<PathBuf>,
    title: String,
    content: Option<String>,
    stdin: bool,
    tags: Vec<String>,
    important: bool,
    json: bool,
) -> Result<()> {
    if title.trim().is_empty() {
        return Err(LeafletError::EmptyTitle);
    }

    let repo = open_repository(db)?;

    let content = if stdin {
        read_stdin()?
    } else {
        content.unwrap_or_default()
    };

    let mut note = Note::new(title, content);
    note.is_important = important;
    add_tags(&mut note.tags, tags);

    let saved = repo.save_note(note).await.map_err(LeafletError::Store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&saved)?);
    } else {
        println!("Created note ({}) - {}", short_id(&saved.id), saved.title);
    }

    Ok(())
}

pub async fn handle_list(db: Option<PathBuf>, archived: bool, json: bool) -> Result<()> {
    let repo = open_repository(db)?;
    let notes = repo.fetch_notes().await.map_err(LeafletError::Store)?;

    let notes: Vec<Note> = notes
        .into_iter()
        .filter(|n| archived || !n.is_archived)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("No notes found.");
    } else {
        println!("Notes:\n");
        for note in &notes {
            print_note_line(note);
        }
    }

    Ok(())
}

pub async fn handle_show(db: Option<PathBuf>, id: String, json: bool) -> Result<()> {
    let repo = open_repository(db)?;
    let resolved = resolve_id(&repo, &id).await?;

    let note = repo
        .fetch_note(&resolved)
        .await
        .map_err(LeafletError::Store)?
        .ok_or(LeafletError::NoteNotFound(id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Note ({})", note.id);
        println!("Title: {}", note.title);
        if note.is_important {
            println!("Important: yes");
        }
        if note.is_archived {
            println!("Archived: yes");
        }
        if !note.tags.is_empty() {
            println!("Tags: {}", note.tags.join(", "));
        }
        println!("Created: {}", note.created_at.format("%Y-%m-%d %H:%M"));
        println!("Updated: {}", note.updated_at.format("%Y-%m-%d %H:%M"));
        if !note.content.is_empty() {
            println!("\n{}", note.content);
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn handle_edit(
    db: Option<PathBuf>,
    id: String,
    title: Option<String>,
    content: Option<String>,
    stdin: bool,
    tags: Vec<String>,
    remove_tags: Vec<String>,
    important: bool,
    no_important: bool,
    archive: bool,
    unarchive: bool,
    json: bool,
) -> Result<()> {
    let repo = open_repository(db)?;
    let resolved = resolve_id(&repo, &id).await?;

    let mut note = repo
        .fetch_note(&resolved)
        .await
        .map_err(LeafletError::Store)?
        .ok_or(LeafletError::NoteNotFound(id))?;

    if let Some(title) = title {
        if title.trim().is_empty() {
            return Err(LeafletError::EmptyTitle);
        }
        note.title = title;
    }

    if stdin {
        note.content = read_stdin()?;
    } else if let Some(content) = content {
        note.content = content;
    }

    add_tags(&mut note.tags, tags);
    note.tags.retain(|t| !remove_tags.contains(t));

    if important {
        note.is_important = true;
    } else if no_important {
        note.is_important = false;
    }

    if archive {
        note.is_archived = true;
    } else if unarchive {
        note.is_archived = false;
    }

    let saved = repo.save_note(note).await.map_err(LeafletError::Store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&saved)?);
    } else {
        println!("Updated note ({}) - {}", short_id(&saved.id), saved.title);
    }

    Ok(())
}

pub async fn handle_delete(db: Option<PathBuf>, id: String, force: bool) -> Result<()> {
    let repo = open_repository(db)?;
    let resolved = resolve_id(&repo, &id).await?;

    let note = repo
        .fetch_note(&resolved)
        .await
        .map_err(LeafletError::Store)?
        .ok_or(LeafletError::NoteNotFound(id))?;

    if !force {
        eprintln!(
            "Delete note ({}) - {}? [y/N] ",
            short_id(&note.id),
            note.title
        );

        // Interactive confirmation only makes sense on a tty.
        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(LeafletError::Io(io::Error::new(
                io::ErrorKind::Other,
                "use --force to delete in non-interactive mode",
            )));
        }
    }

    repo.delete_note(&note.id).await.map_err(LeafletError::Store)?;

    println!("Deleted note ({}) - {}", short_id(&note.id), note.title);

    Ok(())
}

pub async fn handle_search(db: Option<PathBuf>, query: String, json: bool) -> Result<()> {
    let repo = open_repository(db)?;
    let results = repo
        .search_notes(&query)
        .await
        .map_err(LeafletError::Store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No results found for '{}'.", query);
    } else {
        println!("Search results for '{}':\n", query);
        for note in &results {
            print_note_line(note);
        }
    }

    Ok(())
}
