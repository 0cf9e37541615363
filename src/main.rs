use clap::Parser;
use notepad::cli::{
    handle_add, handle_delete, handle_folders, handle_get, handle_list, handle_serve,
    handle_update, Cli, Commands,
};
use notepad::NoteUpdate;
use tracing_subscriber::EnvFilter;

fn init_tracing(serving: bool) {
    // Server logs request traffic; one-shot commands stay quiet unless asked.
    let default_filter = if serving {
        "info,notepad=debug,tower_http=info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Serve(_)));

    let db = cli.db;
    let result = match cli.command {
        Commands::Serve(args) => handle_serve(&db, args),
        Commands::List { folder, json } => handle_list(&db, folder, json),
        Commands::Add {
            title,
            content,
            folder,
            favorite,
            stdin,
            json,
        } => handle_add(&db, title, content, folder, favorite, stdin, json),
        Commands::Get { id, json } => handle_get(&db, id, json),
        Commands::Update {
            id,
            title,
            content,
            folder,
            favorite,
            json,
        } => {
            let update = NoteUpdate {
                title,
                content,
                folder,
                is_favorite: favorite,
            };
            handle_update(&db, id, update, json)
        }
        Commands::Delete { id, force } => handle_delete(&db, id, force),
        Commands::Folders { json } => handle_folders(&db, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
