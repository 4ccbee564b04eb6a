//! Persistence layer for items
//!
//! Owns the physical representation of the `items` table. Callers go through
//! [`ItemService`] for create, list, find, update and delete; nothing here
//! validates input beyond what the column constraints enforce.

mod errors;
mod item;
mod schema;
mod service;

pub use errors::{StorageError, StorageResult};
pub use item::{Item, ItemId};
pub use schema::{apply_schema, ITEMS_SCHEMA};
pub use service::ItemService;
