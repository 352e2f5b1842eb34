//! Change notifications published by the store.

use chrono::{DateTime, Utc};

use fitstock_core::InventoryItemId;
use fitstock_events::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The collection was replaced by a loader.
    Loaded {
        count: usize,
        occurred_at: DateTime<Utc>,
    },
    ItemCreated {
        item_id: InventoryItemId,
        occurred_at: DateTime<Utc>,
    },
    ItemUpdated {
        item_id: InventoryItemId,
        occurred_at: DateTime<Utc>,
    },
    ItemRemoved {
        item_id: InventoryItemId,
        occurred_at: DateTime<Utc>,
    },
}

impl StoreEvent {
    /// The record this event is about, if it concerns a single record.
    pub fn item_id(&self) -> Option<InventoryItemId> {
        match self {
            StoreEvent::Loaded { .. } => None,
            StoreEvent::ItemCreated { item_id, .. }
            | StoreEvent::ItemUpdated { item_id, .. }
            | StoreEvent::ItemRemoved { item_id, .. } => Some(*item_id),
        }
    }
}

impl Event for StoreEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StoreEvent::Loaded { .. } => "inventory.loaded",
            StoreEvent::ItemCreated { .. } => "inventory.item.created",
            StoreEvent::ItemUpdated { .. } => "inventory.item.updated",
            StoreEvent::ItemRemoved { .. } => "inventory.item.removed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StoreEvent::Loaded { occurred_at, .. }
            | StoreEvent::ItemCreated { occurred_at, .. }
            | StoreEvent::ItemUpdated { occurred_at, .. }
            | StoreEvent::ItemRemoved { occurred_at, .. } => *occurred_at,
        }
    }
}
