//! The inventory store: current collection plus the mutations allowed on it.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use fitstock_core::{Clock, DomainError, DomainResult, InventoryItemId, SystemClock};
use fitstock_events::{EventBus, InMemoryEventBus, Subscription};

use crate::confirm::Confirm;
use crate::events::StoreEvent;
use crate::field::ItemFields;
use crate::item::InventoryItem;
use crate::loader::Loader;
use crate::schema::CategorySchema;
use crate::validation::{validate_new, validate_patch};

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(InventoryItem),
    /// The operator declined the confirmation; nothing changed.
    Cancelled,
    /// No record with that id; nothing changed.
    NotFound,
}

/// Holds the ordered collection and owns create/update/remove.
///
/// Mutations never edit the current `Vec` in place: each one builds a new collection
/// and swaps the `Arc`, so a holder of an older `list()` snapshot keeps seeing the
/// old value and `Arc::ptr_eq` tells whether anything changed. Every successful
/// mutation also bumps `revision()` and publishes a [`StoreEvent`].
pub struct InventoryStore {
    items: Arc<Vec<InventoryItem>>,
    schema: CategorySchema,
    clock: Arc<dyn Clock>,
    bus: InMemoryEventBus<StoreEvent>,
    revision: u64,
}

impl core::fmt::Debug for InventoryStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryStore")
            .field("items", &self.items.len())
            .field("schema", &self.schema)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl InventoryStore {
    /// Empty store with the default category schema.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            items: Arc::new(Vec::new()),
            schema: CategorySchema::default(),
            clock,
            bus: InMemoryEventBus::new(),
            revision: 0,
        }
    }

    /// Store pre-populated with `items` (no event is published).
    pub fn from_items(clock: Arc<dyn Clock>, items: Vec<InventoryItem>) -> DomainResult<Self> {
        let mut store = Self::new(clock);
        store.items = Arc::new(admit_collection(items, &store.schema)?);
        Ok(store)
    }

    /// Replace the category schema; existing records are brought in line with it.
    pub fn with_schema(mut self, schema: CategorySchema) -> Self {
        if self.items.iter().any(|item| item.expiry_date().is_some()) {
            let items = self.items.iter().cloned().map(|item| item.conformed(&schema));
            self.items = Arc::new(items.collect());
        }
        self.schema = schema;
        self
    }

    /// Current collection value.
    pub fn list(&self) -> Arc<Vec<InventoryItem>> {
        Arc::clone(&self.items)
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Incremented by every successful mutation and load.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn schema(&self) -> &CategorySchema {
        &self.schema
    }

    pub fn find(&self, id: InventoryItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id_typed() == id)
    }

    /// Register an observer. Each successful mutation is delivered to every
    /// subscription alive at the time.
    pub fn subscribe(&self) -> Subscription<StoreEvent> {
        self.bus.subscribe()
    }

    /// Replace the collection with whatever `loader` returns.
    ///
    /// Awaited once at startup. On failure the current collection is kept.
    pub async fn load<L>(&mut self, loader: &L) -> DomainResult<usize>
    where
        L: Loader + ?Sized,
    {
        let items = loader
            .fetch_all()
            .await
            .and_then(|items| admit_collection(items, &self.schema));
        let items = match items {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(error = %err, "inventory load failed");
                return Err(match err {
                    DomainError::Load(_) => err,
                    other => DomainError::load(other.to_string()),
                });
            }
        };

        let count = items.len();
        self.swap(items);
        self.publish(StoreEvent::Loaded {
            count,
            occurred_at: Utc::now(),
        });
        tracing::info!(count, "inventory loaded");
        Ok(count)
    }

    /// Validate and append a new record.
    ///
    /// Assigns a fresh id and stamps `last_restocked` with today's date.
    pub fn create(&mut self, fields: &ItemFields) -> DomainResult<InventoryItem> {
        let input = validate_new(fields, &self.schema)
            .inspect_err(|err| tracing::warn!(error = %err, "create rejected"))?;

        let item = InventoryItem::new(self.next_id(), input, self.clock.today());
        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.extend(self.items.iter().cloned());
        next.push(item.clone());
        self.swap(next);

        self.publish(StoreEvent::ItemCreated {
            item_id: item.id_typed(),
            occurred_at: Utc::now(),
        });
        tracing::info!(item_id = %item.id_typed(), sku = item.sku(), "item created");
        Ok(item)
    }

    /// Overlay `fields` on the record with `id`.
    ///
    /// Omitted fields keep their values; `id` and `last_restocked` never change.
    pub fn update(&mut self, id: InventoryItemId, fields: &ItemFields) -> DomainResult<InventoryItem> {
        let Some(position) = self.position(id) else {
            tracing::warn!(item_id = %id, "update of unknown item");
            return Err(DomainError::not_found());
        };
        let patch = validate_patch(fields)
            .inspect_err(|err| tracing::warn!(item_id = %id, error = %err, "update rejected"))?;

        let updated = self.items[position].merged(patch, &self.schema);
        let mut next = self.items.as_ref().clone();
        next[position] = updated.clone();
        self.swap(next);

        self.publish(StoreEvent::ItemUpdated {
            item_id: id,
            occurred_at: Utc::now(),
        });
        tracing::info!(item_id = %id, "item updated");
        Ok(updated)
    }

    /// Delete the record with `id` once `confirm` agrees.
    ///
    /// An unknown id is a silent no-op and does not prompt.
    pub fn remove<C>(&mut self, id: InventoryItemId, confirm: &C) -> RemoveOutcome
    where
        C: Confirm + ?Sized,
    {
        let Some(position) = self.position(id) else {
            tracing::debug!(item_id = %id, "remove of unknown item ignored");
            return RemoveOutcome::NotFound;
        };

        let target = &self.items[position];
        let prompt = format!("Delete \"{}\" ({})?", target.name(), target.sku());
        if !confirm.confirm(&prompt) {
            tracing::debug!(item_id = %id, "remove cancelled");
            return RemoveOutcome::Cancelled;
        }

        let mut next = self.items.as_ref().clone();
        let removed = next.remove(position);
        self.swap(next);

        self.publish(StoreEvent::ItemRemoved {
            item_id: id,
            occurred_at: Utc::now(),
        });
        tracing::info!(item_id = %id, sku = removed.sku(), "item removed");
        RemoveOutcome::Removed(removed)
    }

    fn position(&self, id: InventoryItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id_typed() == id)
    }

    fn next_id(&self) -> InventoryItemId {
        loop {
            let id = InventoryItemId::new();
            if self.position(id).is_none() {
                return id;
            }
        }
    }

    fn swap(&mut self, items: Vec<InventoryItem>) {
        self.items = Arc::new(items);
        self.revision += 1;
    }

    fn publish(&self, event: StoreEvent) {
        if let Err(err) = self.bus.publish(event) {
            tracing::error!(error = %err, "failed to notify store subscribers");
        }
    }
}

/// Ids must be unique and required text present; expiry dates outside the
/// schema are dropped.
fn admit_collection(
    items: Vec<InventoryItem>,
    schema: &CategorySchema,
) -> DomainResult<Vec<InventoryItem>> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(item.id_typed()) {
            return Err(DomainError::load(format!("duplicate id {}", item.id_typed())));
        }
        let defects = item.defects();
        if !defects.is_empty() {
            return Err(DomainError::load(format!(
                "record {}: {}",
                item.id_typed(),
                defects.join(", ")
            )));
        }
    }
    Ok(items
        .into_iter()
        .map(|item| item.conformed(schema))
        .collect())
}
