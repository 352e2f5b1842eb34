//! Inventory module.
//!
//! Holds the list of inventory records and every rule applied to it: required-field
//! validation, the per-category field schema, search/category filtering, and the
//! loader capability that seeds the collection. Presentation lives in
//! `fitstock-admin`; this crate never prints or prompts on its own.

pub mod confirm;
pub mod events;
pub mod field;
pub mod filter;
pub mod item;
pub mod loader;
pub mod schema;
pub mod store;
pub mod validation;

pub use confirm::Confirm;
pub use events::StoreEvent;
pub use field::{Field, ItemFields, ParseFieldError};
pub use filter::{
    ALL_CATEGORIES, CategoryFilter, InventoryFilter, Sort, SortDirection, SortKey,
    category_options,
};
pub use item::InventoryItem;
pub use loader::{FailingLoader, JsonFileLoader, Loader, MockLoader, seed_items};
pub use schema::CategorySchema;
pub use store::{InventoryStore, RemoveOutcome};
pub use validation::{ValidatedItem, ValidatedPatch, validate_new, validate_patch};
