//! Document slot contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the single key-value slot the Document persists into.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `save` replaces the whole body for the slot key; readers never observe
//!   a partially written document.
//! - The SQLite implementation refuses connections whose schema is not at
//!   the latest migration version.

use crate::db::migrations::latest_version;
use crate::store::{StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

const SLOT_KEY: &str = "deskboard";

/// Storage slot holding one serialized Document.
pub trait DocumentSlot {
    /// Reads the serialized document, or `None` when the slot is empty.
    fn load(&self) -> StoreResult<Option<String>>;

    /// Replaces the slot contents with `body`.
    fn save(&self, body: &str) -> StoreResult<()>;
}

/// SQLite-backed document slot over the `document_slot` table.
#[derive(Debug)]
pub struct SqliteDocumentSlot<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentSlot<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `StoreError::UninitializedConnection` when the connection's
    ///   `user_version` does not match the latest known migration.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl DocumentSlot for SqliteDocumentSlot<'_> {
    fn load(&self) -> StoreResult<Option<String>> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM document_slot WHERE slot_key = ?1;",
                [SLOT_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(body)
    }

    fn save(&self, body: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO document_slot (slot_key, body, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(slot_key) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at;",
            params![SLOT_KEY, body],
        )?;
        Ok(())
    }
}
