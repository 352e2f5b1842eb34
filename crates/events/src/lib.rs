//! Change notifications (observer mechanics).
//!
//! The inventory store publishes one event per successful mutation; views subscribe
//! and re-render when something arrives. Nothing here knows about inventory.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
