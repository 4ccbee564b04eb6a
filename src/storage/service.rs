//! SQLite-backed item persistence
//!
//! One long-lived connection guarded by a mutex. Every statement binds its
//! inputs; nothing from a request is ever interpolated into SQL.

use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::errors::{StorageError, StorageResult};
use super::item::{Item, ItemId};
use super::schema::apply_schema;

/// Executes the CRUD statements against the `items` table
pub struct ItemService {
    conn: Mutex<Connection>,
}

impl ItemService {
    /// Open (or create) the database at `path` and ensure the schema exists
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path).map_err(|source| StorageError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// In-memory database, used by tests
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::Open {
            path: ":memory:".to_string(),
            source,
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        apply_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Insert a row and return the id the store assigned to it
    pub fn create(&self, name: &str, description: &str) -> StorageResult<ItemId> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO items (name, description) VALUES (?1, ?2)",
            params![name, description],
        )
        .map_err(|e| StorageError::query("insert item", e))?;

        let id = conn.last_insert_rowid();
        debug!(id, "item inserted");
        Ok(id)
    }

    /// All items, most recent first
    pub fn list(&self) -> StorageResult<Vec<Item>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, name, description, created_at FROM items \
                 ORDER BY created_at DESC, id DESC",
            )
            .map_err(|e| StorageError::query("prepare list items", e))?;

        let items = stmt
            .query_map([], Item::from_row)
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| StorageError::query("list items", e))?;

        debug!(count = items.len(), "items listed");
        Ok(items)
    }

    /// Look up a single item; `None` when the id does not exist
    pub fn find(&self, id: ItemId) -> StorageResult<Option<Item>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, name, description, created_at FROM items WHERE id = ?1",
            params![id],
            Item::from_row,
        )
        .optional()
        .map_err(|e| StorageError::query("find item", e))
    }

    /// Overwrite name and description.
    ///
    /// Returns `false` when the id is unknown and also when the stored values
    /// already equal the new ones: SQLite counts matched rows, so the
    /// `IS NOT` guard keeps identical writes from reporting a change.
    pub fn update(&self, id: ItemId, name: &str, description: &str) -> StorageResult<bool> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE items SET name = ?1, description = ?2 \
                 WHERE id = ?3 AND (name IS NOT ?1 OR description IS NOT ?2)",
                params![name, description, id],
            )
            .map_err(|e| StorageError::query("update item", e))?;

        debug!(id, changed, "item update executed");
        Ok(changed > 0)
    }

    /// Hard delete; returns whether a row was removed
    pub fn delete(&self, id: ItemId) -> StorageResult<bool> {
        let conn = self.conn()?;
        let removed = conn
            .execute("DELETE FROM items WHERE id = ?1", params![id])
            .map_err(|e| StorageError::query("delete item", e))?;

        debug!(id, removed, "item delete executed");
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ItemService {
        ItemService::open_in_memory().unwrap()
    }

    #[test]
    fn test_create_then_find() {
        let svc = service();
        let id = svc.create("Pen", "Blue ink").unwrap();

        let item = svc.find(id).unwrap().unwrap();
        assert_eq!(item.id, id);
        assert_eq!(item.name, "Pen");
        assert_eq!(item.description.as_deref(), Some("Blue ink"));
    }

    #[test]
    fn test_find_missing_is_none() {
        let svc = service();
        assert!(svc.find(42).unwrap().is_none());
    }

    #[test]
    fn test_list_empty() {
        let svc = service();
        assert!(svc.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_most_recent_first() {
        let svc = service();
        let a = svc.create("A", "first").unwrap();
        let b = svc.create("B", "second").unwrap();

        let ids: Vec<_> = svc.list().unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[test]
    fn test_update_changes_values() {
        let svc = service();
        let id = svc.create("Pen", "Blue ink").unwrap();

        assert!(svc.update(id, "Pen", "Black ink").unwrap());
        let item = svc.find(id).unwrap().unwrap();
        assert_eq!(item.description.as_deref(), Some("Black ink"));
    }

    #[test]
    fn test_update_identical_values_reports_no_change() {
        let svc = service();
        let id = svc.create("Pen", "Blue ink").unwrap();
        assert!(!svc.update(id, "Pen", "Blue ink").unwrap());
    }

    #[test]
    fn test_update_missing_reports_no_change() {
        let svc = service();
        assert!(!svc.update(99, "Pen", "Blue ink").unwrap());
    }

    #[test]
    fn test_update_keeps_created_at() {
        let svc = service();
        let id = svc.create("Pen", "Blue ink").unwrap();
        let before = svc.find(id).unwrap().unwrap().created_at;

        svc.update(id, "Pencil", "Graphite").unwrap();
        let after = svc.find(id).unwrap().unwrap().created_at;
        assert_eq!(before, after);
    }

    #[test]
    fn test_delete_twice() {
        let svc = service();
        let id = svc.create("Pen", "Blue ink").unwrap();

        assert!(svc.delete(id).unwrap());
        assert!(svc.find(id).unwrap().is_none());
        assert!(!svc.delete(id).unwrap());
    }

    #[test]
    fn test_values_are_bound_not_interpolated() {
        let svc = service();
        let hostile = "x'); DROP TABLE items; --";
        let id = svc.create(hostile, hostile).unwrap();

        let item = svc.find(id).unwrap().unwrap();
        assert_eq!(item.name, hostile);
        assert_eq!(svc.list().unwrap().len(), 1);
    }
}
