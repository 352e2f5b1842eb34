//! `fitstock-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the inventory store and
//! the admin screen (no IO, no presentation concerns).

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::InventoryItemId;
