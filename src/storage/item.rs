//! The item record as stored in the `items` table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Surrogate key assigned by the store
pub type ItemId = i64;

/// A persisted item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Nullable at the column level; rows written through
    /// [`ItemService`](super::ItemService) always carry a value.
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_item_serialization() {
        let item = Item {
            id: 7,
            name: "Café".to_string(),
            description: Some("a/b".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Café");
        assert_eq!(json["description"], "a/b");
        assert_eq!(json["created_at"], "2024-05-01T12:30:00Z");
    }
}
