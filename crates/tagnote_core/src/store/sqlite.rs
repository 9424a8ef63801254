//! SQLite slot backend over the `kv_slots` table.
//!
//! # Invariants
//! - One row per key; writes replace the whole value.
//! - The connection must come from `db::open_db*` so the table exists.

use super::{KvBackend, StoreResult};
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};

/// [`KvBackend`] borrowing a migrated SQLite connection.
pub struct SqliteKvBackend<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvBackend<'conn> {
    /// Constructs a backend from a migrated connection.
    ///
    /// # Errors
    /// - `DbError::MissingRequiredTable` when `kv_slots` is absent.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'kv_slots'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(DbError::MissingRequiredTable("kv_slots").into());
        }
        Ok(Self { conn })
    }
}

impl KvBackend for SqliteKvBackend<'_> {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
