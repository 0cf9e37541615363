use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::error::{NotepadError, Result};

/// Connection checked out of the pool. Returned to the pool when dropped.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Pooled SQLite store holding the notes table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
    path: PathBuf,
}

impl SqliteStore {
    /// Open the store at `path`. No connection is made until one is requested,
    /// so this succeeds even if the database cannot be reached yet.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, DEFAULT_CONNECTION_TIMEOUT)
    }

    /// Like [`SqliteStore::open`], with an explicit limit on how long a
    /// connection checkout may wait.
    pub fn open_with_timeout(path: &Path, connection_timeout: Duration) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")
        });

        let pool = Pool::builder()
            .max_size(DEFAULT_POOL_SIZE)
            .min_idle(Some(0))
            .connection_timeout(connection_timeout)
            .build_unchecked(manager);

        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// Check out a connection for the duration of one operation.
    pub fn connection(&self) -> Result<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| NotepadError::StoreUnavailable(e.to_string()))
    }

    /// Create the notes table and its indexes if they do not exist yet.
    pub fn init_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL DEFAULT '',
                folder TEXT NOT NULL DEFAULT 'General',
                is_favorite INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_notes_folder ON notes(folder);
            ",
        )?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
