use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{
    DEFAULT_DATABASE_PATH, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RETRY_DELAY_SECS,
    DEFAULT_STARTUP_RETRIES, DEFAULT_STATIC_DIR,
};

#[derive(Parser, Debug)]
#[command(name = "notepad")]
#[command(version, about = "A small note-taking backend with folders and favorites")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true, env = "NOTEPAD_DB", default_value = DEFAULT_DATABASE_PATH)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),

    /// List notes, most recently changed first
    List {
        /// Only list notes in this folder (exact match)
        #[arg(long, short = 'f')]
        folder: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new note
    Add {
        /// Note title
        title: String,

        /// Note body
        #[arg(long, short = 'c', conflicts_with = "stdin")]
        content: Option<String>,

        /// Folder label (defaults to "General")
        #[arg(long, short = 'f')]
        folder: Option<String>,

        /// Mark the note as a favorite
        #[arg(long)]
        favorite: bool,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Get {
        /// Note id
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change some fields of a note; omitted fields are left as they are
    Update {
        /// Note id
        id: i64,

        /// New title
        #[arg(long, short = 't')]
        title: Option<String>,

        /// New content
        #[arg(long, short = 'c')]
        content: Option<String>,

        /// Move the note to this folder
        #[arg(long, short = 'f')]
        folder: Option<String>,

        /// Set or clear the favorite flag
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        favorite: Option<bool>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note permanently
    Delete {
        /// Note id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// List the folders in use
    Folders {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "NOTEPAD_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, short = 'p', env = "NOTEPAD_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory with a prebuilt frontend, served at / when present
    #[arg(long, env = "NOTEPAD_STATIC_DIR", default_value = DEFAULT_STATIC_DIR)]
    pub static_dir: PathBuf,

    /// Do not serve static files (API only)
    #[arg(long)]
    pub no_static: bool,

    /// Schema creation attempts before starting without tables
    #[arg(long, default_value_t = DEFAULT_STARTUP_RETRIES)]
    pub startup_retries: u32,

    /// Seconds to wait between schema creation attempts
    #[arg(long, default_value_t = DEFAULT_RETRY_DELAY_SECS)]
    pub retry_delay_secs: u64,
}
