//! Item controller
//!
//! Sits between the HTTP handlers and [`ItemService`]: trims and checks the
//! two text fields, calls storage, and reports the outcome as a
//! [`ControllerResult`]. Nothing in here knows about HTTP.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::warn;

use super::errors::{ControllerError, ControllerResult};
use super::payload::ParsedPayload;
use crate::storage::{Item, ItemId, ItemService};

const FIELDS_REQUIRED: &str = "both fields required";

/// Keys accepted for the name field, canonical first
const NAME_KEYS: &[&str] = &["name", "nome"];
/// Keys accepted for the description field, canonical first
const DESCRIPTION_KEYS: &[&str] = &["description", "descricao"];

/// Fields echoed back after a create or update.
///
/// Serialized under both the canonical keys and the `nome`/`descricao`
/// aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub id: ItemId,
    pub name: String,
    pub description: String,
}

impl Serialize for ItemFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ItemFields", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("nome", &self.name)?;
        state.serialize_field("descricao", &self.description)?;
        state.end()
    }
}

/// Trimmed, non-blank name and description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInput {
    pub name: String,
    pub description: String,
}

impl ItemInput {
    /// Extract and validate both fields from a decoded payload
    pub fn from_payload(payload: &ParsedPayload) -> ControllerResult<Self> {
        let name = payload.text_any(NAME_KEYS).unwrap_or_default();
        let description = payload.text_any(DESCRIPTION_KEYS).unwrap_or_default();
        Self::new(&name, &description)
    }

    pub fn new(name: &str, description: &str) -> ControllerResult<Self> {
        let name = name.trim();
        let description = description.trim();

        if name.is_empty() || description.is_empty() {
            return Err(ControllerError::Validation(FIELDS_REQUIRED));
        }

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
        })
    }
}

/// Validation and result shaping over an injected [`ItemService`]
pub struct ItemController {
    service: ItemService,
}

impl ItemController {
    pub fn new(service: ItemService) -> Self {
        Self { service }
    }

    /// Create an item from the payload's `name` and `description`
    pub fn create(&self, payload: &ParsedPayload) -> ControllerResult<ItemFields> {
        let input = ItemInput::from_payload(payload).inspect_err(|_| {
            warn!("create rejected: missing fields");
        })?;

        let id = self.service.create(&input.name, &input.description)?;

        Ok(ItemFields {
            id,
            name: input.name,
            description: input.description,
        })
    }

    /// Every item, most recent first
    pub fn list(&self) -> ControllerResult<Vec<Item>> {
        Ok(self.service.list()?)
    }

    /// Replace the name and description of item `id`
    pub fn update(&self, id: ItemId, payload: &ParsedPayload) -> ControllerResult<ItemFields> {
        let input = ItemInput::from_payload(payload).inspect_err(|_| {
            warn!(id, "update rejected: missing fields");
        })?;

        // No-op writes and unknown ids both land here.
        if !self.service.update(id, &input.name, &input.description)? {
            return Err(ControllerError::NotFoundOrUnchanged);
        }

        Ok(ItemFields {
            id,
            name: input.name,
            description: input.description,
        })
    }

    /// Remove item `id`
    pub fn delete(&self, id: ItemId) -> ControllerResult<()> {
        if self.service.delete(id)? {
            Ok(())
        } else {
            Err(ControllerError::NotFound)
        }
    }

    /// Fetch item `id`
    pub fn find(&self, id: ItemId) -> ControllerResult<Item> {
        self.service.find(id)?.ok_or(ControllerError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ItemController {
        ItemController::new(ItemService::open_in_memory().unwrap())
    }

    fn json(body: &str) -> ParsedPayload {
        ParsedPayload::from_json(body.as_bytes()).unwrap()
    }

    #[test]
    fn test_fields_echo_both_spellings() {
        let fields = ItemFields {
            id: 1,
            name: "Pen".to_string(),
            description: "Blue ink".to_string(),
        };

        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Pen",
                "description": "Blue ink",
                "nome": "Pen",
                "descricao": "Blue ink",
            })
        );
    }

    #[test]
    fn test_input_trims_edges_only() {
        let input = ItemInput::new(" Widget ", " A  thing ").unwrap();
        assert_eq!(input.name, "Widget");
        assert_eq!(input.description, "A  thing");
    }

    #[test]
    fn test_input_rejects_blank() {
        assert!(matches!(
            ItemInput::new("   ", "x"),
            Err(ControllerError::Validation(FIELDS_REQUIRED))
        ));
        assert!(ItemInput::new("x", "").is_err());
    }

    #[test]
    fn test_create_echoes_trimmed_fields() {
        let ctl = controller();
        let created = ctl
            .create(&json(r#"{"name":" Widget ","description":" A thing "}"#))
            .unwrap();
        assert_eq!(created.name, "Widget");
        assert_eq!(created.description, "A thing");

        let stored = ctl.find(created.id).unwrap();
        assert_eq!(stored.name, "Widget");
        assert_eq!(stored.description.as_deref(), Some("A thing"));
    }

    #[test]
    fn test_create_validation_skips_storage() {
        let ctl = controller();
        let err = ctl.create(&json(r#"{"name":"Pen"}"#)).unwrap_err();
        assert_eq!(err.to_string(), "both fields required");
        assert!(ctl.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_accepts_aliases() {
        let ctl = controller();
        let created = ctl
            .create(&json(r#"{"nome":"Caneta","descricao":"Tinta azul"}"#))
            .unwrap();
        assert_eq!(created.name, "Caneta");
        assert_eq!(created.description, "Tinta azul");
    }

    #[test]
    fn test_update_paths() {
        let ctl = controller();
        let id = ctl
            .create(&json(r#"{"name":"Pen","description":"Blue ink"}"#))
            .unwrap()
            .id;

        let same = ctl.update(id, &json(r#"{"name":"Pen","description":"Blue ink"}"#));
        assert!(matches!(same, Err(ControllerError::NotFoundOrUnchanged)));

        let missing = ctl.update(id + 1, &json(r#"{"name":"Pen","description":"x"}"#));
        assert!(matches!(missing, Err(ControllerError::NotFoundOrUnchanged)));

        let blank = ctl.update(id, &json(r#"{"name":"","description":"x"}"#));
        assert!(matches!(blank, Err(ControllerError::Validation(_))));

        let updated = ctl
            .update(id, &json(r#"{"name":"Pen","description":"Black ink"}"#))
            .unwrap();
        assert_eq!(updated.description, "Black ink");
        assert_eq!(
            ctl.find(id).unwrap().description.as_deref(),
            Some("Black ink")
        );
    }

    #[test]
    fn test_delete_and_find() {
        let ctl = controller();
        let id = ctl
            .create(&json(r#"{"name":"Pen","description":"Blue ink"}"#))
            .unwrap()
            .id;

        ctl.delete(id).unwrap();
        assert!(matches!(ctl.find(id), Err(ControllerError::NotFound)));
        assert!(matches!(ctl.delete(id), Err(ControllerError::NotFound)));
    }
}
