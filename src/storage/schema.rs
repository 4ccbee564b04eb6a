//! Idempotent table-create script for the `items` table

use rusqlite::Connection;

use super::errors::{StorageError, StorageResult};

/// Schema applied on every open. Safe to run repeatedly.
pub const ITEMS_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);
";

/// Create the `items` table if it does not exist yet
pub fn apply_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(ITEMS_SCHEMA)
        .map_err(|e| StorageError::query("apply schema", e))
}
