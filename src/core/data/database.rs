//! SQLite database for the song library
//!
//! Owns the single connection shared by all requests and creates the
//! `groups` and `songs` tables on first open. rusqlite is synchronous, so
//! every statement runs on tokio's blocking pool via [`Database::run`].

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::error::{DatabaseError, Result, SongLibraryError};

const CURRENT_DB_VERSION: u32 = 1;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub async fn new(db_path: &Path) -> Result<Self> {
        let db_path: PathBuf = db_path.to_path_buf();

        tokio::task::spawn_blocking(move || -> Result<Self> {
            info!("Opening database at: {}", db_path.display());

            // Ensure parent directory exists
            if let Some(parent) = db_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let conn = Connection::open(&db_path).map_err(DatabaseError::Connection)?;

            // Enable WAL mode for better concurrent access
            conn.pragma_update(None, "journal_mode", "WAL")?;

            Self::from_connection(conn)
        })
        .await
        .map_err(|e| SongLibraryError::Internal(e.into()))?
    }

    /// Private in-memory database, used by tests and dry runs.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::Connection)?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;

        // Check and upgrade database if needed
        let existing_user_version: u32 =
            conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if existing_user_version < CURRENT_DB_VERSION {
            Self::upgrade_database(&mut conn, existing_user_version)?;
        }

        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn upgrade_database(conn: &mut Connection, existing_version: u32) -> Result<()> {
        debug!("Upgrading database from version {} to {}", existing_version, CURRENT_DB_VERSION);

        if existing_version == 0 {
            let tx = conn.transaction().map_err(DatabaseError::Transaction)?;

            tx.execute_batch(r#"
                CREATE TABLE IF NOT EXISTS groups (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL UNIQUE
                );

                CREATE TABLE IF NOT EXISTS songs (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    band TEXT NOT NULL,
                    song TEXT NOT NULL,
                    release_date TEXT NOT NULL DEFAULT '',
                    text TEXT NOT NULL DEFAULT '',
                    link TEXT NOT NULL DEFAULT '',
                    group_id INTEGER REFERENCES groups (id)
                );

                CREATE INDEX IF NOT EXISTS idx_songs_band ON songs(band);
                CREATE INDEX IF NOT EXISTS idx_songs_song ON songs(song);
                CREATE INDEX IF NOT EXISTS idx_songs_group_id ON songs(group_id);
            "#)
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;

            tx.pragma_update(None, "user_version", CURRENT_DB_VERSION)?;

            tx.commit().map_err(DatabaseError::Transaction)?;
        }

        info!("Database schema is at version {}", CURRENT_DB_VERSION);
        Ok(())
    }

    /// Run `op` with exclusive access to the connection on the blocking pool.
    ///
    /// The async caller only waits on the join handle, so a slow statement
    /// never stalls the runtime thread it was issued from.
    pub async fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().map_err(|_| {
                SongLibraryError::Internal(anyhow::anyhow!("database connection lock poisoned"))
            })?;
            op(&mut conn)
        })
        .await
        .map_err(|e| SongLibraryError::Internal(e.into()))?
    }
}
