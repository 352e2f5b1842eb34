//! The inventory screen: table, filters, and the add/edit modal over one store.
//!
//! Every store error ends here. Failures become notifications and the screen keeps
//! running; nothing is returned to the caller as an `Err`.

use fitstock_core::{DomainError, InventoryItemId};
use fitstock_events::{Event, Subscription};
use fitstock_inventory::{
    CategoryFilter, Confirm, Field, InventoryFilter, InventoryItem, InventoryStore, Loader,
    RemoveOutcome, Sort, StoreEvent, category_options,
};

use crate::form::{FormState, ModalState};
use crate::notify::{Notification, Notifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// The fetch failed; the table shows the empty state.
    Failed(String),
}

/// One table row of the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    /// 1-based position in the current view.
    pub index: usize,
    pub item: &'a InventoryItem,
    pub low_stock: bool,
}

pub struct InventoryScreen<N> {
    store: InventoryStore,
    filter: InventoryFilter,
    modal: ModalState,
    notifier: N,
    changes: Subscription<StoreEvent>,
    load_state: LoadState,
}

impl<N: Notifier> InventoryScreen<N> {
    pub fn new(store: InventoryStore, notifier: N) -> Self {
        let changes = store.subscribe();
        Self {
            store,
            filter: InventoryFilter::new(),
            modal: ModalState::Closed,
            notifier,
            changes,
            load_state: LoadState::Loading,
        }
    }

    /// Run the initial fetch. A failure is reported and leaves an empty table.
    pub async fn load<L>(&mut self, loader: &L)
    where
        L: Loader + ?Sized,
    {
        self.load_state = LoadState::Loading;
        match self.store.load(loader).await {
            Ok(_) => self.load_state = LoadState::Ready,
            Err(err) => {
                let reason = reason(&err);
                self.notifier
                    .notify(Notification::error(format!("Failed to load inventory: {reason}")));
                self.load_state = LoadState::Failed(reason);
            }
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn filter(&self) -> &InventoryFilter {
        &self.filter
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        tracing::debug!(query = %self.filter.query, "search changed");
    }

    /// `"all"` or an exact category name.
    pub fn set_category(&mut self, selector: &str) {
        self.filter.category = CategoryFilter::parse(selector);
        tracing::debug!(category = selector, "category filter changed");
    }

    pub fn set_sort(&mut self, sort: Option<Sort>) {
        self.filter.sort = sort;
    }

    /// The filtered, sorted table.
    pub fn rows(&self) -> Vec<Row<'_>> {
        self.filter
            .apply(self.store.items())
            .into_iter()
            .enumerate()
            .map(|(i, item)| Row {
                index: i + 1,
                item,
                low_stock: item.is_low_stock(),
            })
            .collect()
    }

    pub fn category_options(&self) -> Vec<String> {
        category_options(self.store.items())
    }

    /// True when the store changed since the last call.
    pub fn take_changed(&mut self) -> bool {
        let events = self.changes.drain();
        for event in &events {
            tracing::debug!(event = event.event_type(), item_id = ?event.item_id(), "store changed");
        }
        !events.is_empty()
    }

    /// Closed -> AddOpen. Refused while another modal is open.
    pub fn open_add(&mut self) -> bool {
        if self.modal.is_open() {
            tracing::debug!("open_add ignored: modal already open");
            return false;
        }
        self.modal = ModalState::AddOpen(FormState::blank());
        true
    }

    /// Closed -> EditOpen(record). Refused while another modal is open.
    pub fn open_edit(&mut self, id: InventoryItemId) -> bool {
        if self.modal.is_open() {
            tracing::debug!("open_edit ignored: modal already open");
            return false;
        }
        let Some(item) = self.store.find(id) else {
            self.notifier.notify(Notification::error("Item not found"));
            return false;
        };
        self.modal = ModalState::EditOpen {
            id,
            form: FormState::from_item(item),
        };
        true
    }

    /// Type into the open form. Ignored when no modal is open.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        match self.modal.form_mut() {
            Some(form) => {
                form.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Submit the open form.
    ///
    /// On success the modal closes and the stored record is returned. On failure the
    /// modal stays open with the input intact.
    pub fn submit(&mut self) -> Option<InventoryItem> {
        let schema = self.store.schema().clone();
        let (result, success) = match &self.modal {
            ModalState::Closed => return None,
            ModalState::AddOpen(form) => (
                self.store.create(&form.to_fields(&schema)),
                "Item added successfully",
            ),
            ModalState::EditOpen { id, form } => (
                self.store.update(*id, &form.to_fields(&schema)),
                "Item updated successfully",
            ),
        };

        match result {
            Ok(item) => {
                self.modal = ModalState::Closed;
                self.notifier.notify(Notification::success(success));
                Some(item)
            }
            Err(err) => {
                self.notifier.notify(Notification::error(reason(&err)));
                None
            }
        }
    }

    /// Discard the form; the store is untouched.
    pub fn cancel(&mut self) {
        self.modal = ModalState::Closed;
    }

    /// Delete behind a confirmation gate.
    ///
    /// Refused (`None`, no prompt) while a modal is open, so an edit form
    /// never outlives its record.
    pub fn delete<C>(&mut self, id: InventoryItemId, confirm: &C) -> Option<RemoveOutcome>
    where
        C: Confirm + ?Sized,
    {
        if self.modal.is_open() {
            tracing::debug!("delete ignored: modal open");
            self.notifier
                .notify(Notification::error("Close the open form before deleting"));
            return None;
        }
        let outcome = self.store.remove(id, confirm);
        if let RemoveOutcome::Removed(_) = outcome {
            self.notifier
                .notify(Notification::success("Item deleted successfully"));
        }
        Some(outcome)
    }
}

/// Message suitable for a toast: the error's payload without the variant prefix.
fn reason(err: &DomainError) -> String {
    match err {
        DomainError::Validation(msg) | DomainError::Load(msg) | DomainError::InvalidId(msg) => {
            msg.clone()
        }
        DomainError::NotFound => "Item not found".to_string(),
    }
}
