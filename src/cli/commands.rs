use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "leaflet")]
#[command(version, about = "A local-first notes engine")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file (defaults to the platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new note
    Add {
        /// Note title
        title: String,

        /// Note content
        #[arg(long, short = 'c')]
        content: Option<String>,

        /// Read content from stdin
        #[arg(long, conflicts_with = "content")]
        stdin: bool,

        /// Tags (can be specified multiple times)
        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,

        /// Mark the note as important
        #[arg(long)]
        important: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List notes, most recently updated first
    List {
        /// Include archived notes
        #[arg(long)]
        archived: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Show {
        /// Note id (full UUID or unique prefix)
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit an existing note
    Edit {
        /// Note id (full UUID or unique prefix)
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New content
        #[arg(long, short = 'c')]
        content: Option<String>,

        /// Read new content from stdin
        #[arg(long, conflicts_with = "content")]
        stdin: bool,

        /// Tags to add (can be specified multiple times)
        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,

        /// Tags to remove (can be specified multiple times)
        #[arg(long = "remove-tag")]
        remove_tags: Vec<String>,

        /// Mark the note as important
        #[arg(long, conflicts_with = "no_important")]
        important: bool,

        /// Clear the important flag
        #[arg(long = "no-important")]
        no_important: bool,

        /// Archive the note
        #[arg(long, conflicts_with = "unarchive")]
        archive: bool,

        /// Unarchive the note
        #[arg(long)]
        unarchive: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note
    Delete {
        /// Note id (full UUID or unique prefix)
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Search notes by title, content, or tag
    Search {
        /// Query text; a blank query lists everything
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
