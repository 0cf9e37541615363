use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;
use crate::entity::{NewNote, Note, NoteUpdate};
use crate::error::{NotepadError, Result};
use crate::server;
use crate::storage::{NoteRepository, SqliteStore};

use super::ServeArgs;

/// Open the store and make sure the notes table exists.
fn open_store(db: &Path) -> Result<SqliteStore> {
    let store = SqliteStore::open(db)?;
    store.init_schema()?;
    Ok(store)
}

fn print_note(note: &Note) {
    let star = if note.is_favorite { " *" } else { "" };
    println!("Note {} [{}]{}", note.id, note.folder, star);
    println!("Title: {}", note.title);
    println!("Created: {}", note.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(updated_at) = note.updated_at {
        println!("Updated: {}", updated_at.format("%Y-%m-%d %H:%M"));
    }
    if !note.content.is_empty() {
        println!("\n{}", note.content);
    }
}

pub fn handle_serve(db: &Path, args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        database_path: db.to_path_buf(),
        static_dir: if args.no_static {
            None
        } else {
            Some(args.static_dir)
        },
        startup_retries: args.startup_retries,
        retry_delay: Duration::from_secs(args.retry_delay_secs),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let shutdown = CancellationToken::new();
        server::shutdown_on_ctrl_c(shutdown.clone());
        server::serve(config, shutdown).await
    })
}

pub fn handle_list(db: &Path, folder: Option<String>, json: bool) -> Result<()> {
    let store = open_store(db)?;
    let conn = store.connection()?;

    let notes = NoteRepository::list(&conn, folder.as_deref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("No notes found.");
    } else {
        let total = NoteRepository::count(&conn)?;
        match folder.as_deref().filter(|f| !f.is_empty()) {
            Some(folder) => println!("Notes in {} ({} of {}):\n", folder, notes.len(), total),
            None => println!("Notes ({}):\n", total),
        }
        for note in notes {
            let star = if note.is_favorite { "*" } else { " " };
            println!(
                "  {:>4} {} {}  [{}]  {}",
                note.id,
                star,
                note.last_modified().format("%Y-%m-%d %H:%M"),
                note.folder,
                note.title
            );
        }
    }

    Ok(())
}

pub fn handle_add(
    db: &Path,
    title: String,
    content: Option<String>,
    folder: Option<String>,
    favorite: bool,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let store = open_store(db)?;
    let conn = store.connection()?;

    let mut new = NewNote::new(title).favorite(favorite);
    new.folder = folder;
    new.content = content;

    if stdin {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        new.content = Some(buf);
    }

    let note = NoteRepository::create(&conn, new)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Created note {} in {}: {}", note.id, note.folder, note.title);
    }

    Ok(())
}

pub fn handle_get(db: &Path, id: i64, json: bool) -> Result<()> {
    let store = open_store(db)?;
    let conn = store.connection()?;

    let note = NoteRepository::get(&conn, id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        print_note(&note);
    }

    Ok(())
}

pub fn handle_update(db: &Path, id: i64, update: NoteUpdate, json: bool) -> Result<()> {
    let store = open_store(db)?;
    let conn = store.connection()?;

    let note = NoteRepository::update(&conn, id, update)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Updated note {}: {}", note.id, note.title);
    }

    Ok(())
}

pub fn handle_delete(db: &Path, id: i64, force: bool) -> Result<()> {
    let store = open_store(db)?;
    let conn = store.connection()?;

    let note = NoteRepository::get(&conn, id)?;

    // Confirm deletion unless --force is used
    if !force {
        eprintln!("Delete note {} - {}? [y/N] ", note.id, note.title);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(NotepadError::validation(
                "force",
                "Use --force to delete in non-interactive mode",
            ));
        }
    }

    NoteRepository::delete(&conn, id)?;
    println!("Deleted note {}: {}", note.id, note.title);

    Ok(())
}

pub fn handle_folders(db: &Path, json: bool) -> Result<()> {
    let store = open_store(db)?;
    let conn = store.connection()?;

    let folders = NoteRepository::list_folders(&conn)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&folders)?);
    } else if folders.is_empty() {
        println!("No folders yet.");
    } else {
        for folder in folders {
            println!("{}", folder);
        }
    }

    Ok(())
}
