use clap::Parser;
use leaflet::cli::{
    handle_add, handle_delete, handle_edit, handle_list, handle_search, handle_show, Cli, Commands,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = cli.db;

    let result = match cli.command {
        Commands::Add {
            title,
            content,
            stdin,
            tags,
            important,
            json,
        } => handle_add(db, title, content, stdin, tags, important, json).await,
        Commands::List { archived, json } => handle_list(db, archived, json).await,
        Commands::Show { id, json } => handle_show(db, id, json).await,
        Commands::Edit {
            id,
            title,
            content,
            stdin,
            tags,
            remove_tags,
            important,
            no_important,
            archive,
            unarchive,
            json,
        } => {
            handle_edit(
                db,
                id,
                title,
                content,
                stdin,
                tags,
                remove_tags,
                important,
                no_important,
                archive,
                unarchive,
                json,
            )
            .await
        }
        Commands::Delete { id, force } => handle_delete(db, id, force).await,
        Commands::Search { query, json } => handle_search(db, query, json).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
