use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use super::KeyValueStore;
use crate::error::{IronfitError, Result};

/// SQLite-backed key-value medium.
///
/// A single `Connection` behind a `Mutex`; every call locks, runs one
/// statement and returns. There are no multi-statement transactions, which
/// matches the read-modify-write contract of the store adapter.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl SqliteStore {
    /// Open (or create) a file-backed database at `path`.
    ///
    /// Creates the parent directory if needed, sets WAL journal mode and
    /// creates the `kv` table if it doesn't already exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    IronfitError::Storage(format!(
                        "failed to create directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }
        let conn = Connection::open(&path)
            .map_err(|e| IronfitError::Storage(format!("failed to open SQLite database: {e}")))?;

        Self::configure_and_init(conn, path)
    }

    /// Open an in-memory SQLite database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            IronfitError::Storage(format!("failed to open in-memory SQLite database: {e}"))
        })?;

        Self::configure_and_init(conn, PathBuf::from(":memory:"))
    }

    /// Return the path this database was opened with (`:memory:` for in-memory).
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ── helpers ────────────────────────────────────────────────────────

    fn configure_and_init(conn: Connection, path: PathBuf) -> Result<Self> {
        conn.execute_batch("PRAGMA journal_mode = WAL;")
            .map_err(|e| IronfitError::Storage(format!("failed to set WAL mode: {e}")))?;

        let store = Self {
            conn: Mutex::new(conn),
            path,
        };
        store.create_tables()?;

        tracing::debug!("sqlite store ready at {}", store.path.display());
        Ok(store)
    }

    /// Create the `kv` table (idempotent).
    fn create_tables(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )
        .map_err(|e| IronfitError::Storage(format!("failed to create tables: {e}")))?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| IronfitError::Storage(format!("failed to acquire database lock: {e}")))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, value, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_in_memory_creates_kv_table() {
        let store = SqliteStore::open_in_memory().expect("should open in-memory DB");
        assert_eq!(store.path().to_str().unwrap(), ":memory:");

        let conn = store.conn.lock().unwrap();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"kv".to_string()));
    }

    #[test]
    fn create_tables_is_idempotent() {
        let store = SqliteStore::open_in_memory().expect("should open in-memory DB");
        store.create_tables().expect("idempotent create_tables");
    }

    #[test]
    fn set_get_remove() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("Users").unwrap(), None);

        store.set("Users", "[]").unwrap();
        assert_eq!(store.get("Users").unwrap().as_deref(), Some("[]"));

        store.set("Users", "[1]").unwrap();
        assert_eq!(store.get("Users").unwrap().as_deref(), Some("[1]"));

        store.remove("Users").unwrap();
        assert_eq!(store.get("Users").unwrap(), None);
        // Removing twice is fine.
        store.remove("Users").unwrap();
    }

    #[test]
    fn values_survive_reopen() {
        let dir = std::env::temp_dir().join(format!("ironfit-test-{}", uuid::Uuid::now_v7()));
        let db_path = dir.join("nested").join("test.db");

        {
            let store = SqliteStore::open(&db_path).expect("should open file DB");
            assert_eq!(store.path(), db_path);
            store.set("MockDataSeeded", "true").unwrap();
        }

        let reopened = SqliteStore::open(&db_path).unwrap();
        assert_eq!(
            reopened.get("MockDataSeeded").unwrap().as_deref(),
            Some("true")
        );

        drop(reopened);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
