use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Key/value slot storage on top of SQLite
///
/// A slot is one row; `set` replaces the whole value in a single statement,
/// so readers never observe a half-written value.
pub struct SlotCache {
    conn: Mutex<Connection>,
}

impl SlotCache {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path.as_ref())?;
        debug!("Opened slot cache at {}", db_path.as_ref().display());

        // Initialize schema on first run
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Throwaway database, gone when the cache is dropped
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-statement can't leave SQLite inconsistent, so a poisoned
        // lock is still usable
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Raw value stored under `key`, or `None` if the slot was never written
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn()
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
    }

    /// Overwrite the slot with `value`
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().timestamp();
        self.conn().execute(
            "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;

        debug!("Wrote {} bytes to slot '{}'", value.len(), key);
        Ok(())
    }
}
