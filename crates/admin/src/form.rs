//! Add/edit form state and the modal that hosts it.

use std::collections::BTreeMap;

use fitstock_core::InventoryItemId;
use fitstock_inventory::{CategorySchema, Field, InventoryItem, ItemFields};

/// Values of the form inputs, all kept as text exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<Field, String>,
}

impl FormState {
    /// Every input empty (the "Add" form).
    pub fn blank() -> Self {
        Self {
            values: Field::ALL.into_iter().map(|f| (f, String::new())).collect(),
        }
    }

    /// Editable copy of a stored record, values stringified.
    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            values: Field::ALL
                .into_iter()
                .map(|f| (f, item.display_value(f)))
                .collect(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn category(&self) -> &str {
        self.get(Field::Category).trim()
    }

    /// Inputs to present, given the category currently typed in.
    pub fn visible_fields(&self, schema: &CategorySchema) -> Vec<Field> {
        schema.fields_for(self.category())
    }

    /// Collect the visible inputs. Hidden inputs keep their text (switching the
    /// category back shows it again) but are never submitted.
    pub fn to_fields(&self, schema: &CategorySchema) -> ItemFields {
        self.visible_fields(schema)
            .into_iter()
            .fold(ItemFields::new(), |fields, field| {
                fields.with(field, self.get(field))
            })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::blank()
    }
}

/// At most one modal is open at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    AddOpen(FormState),
    EditOpen {
        id: InventoryItemId,
        form: FormState,
    },
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub fn title(&self) -> Option<&'static str> {
        match self {
            ModalState::Closed => None,
            ModalState::AddOpen(_) => Some("Add Item"),
            ModalState::EditOpen { .. } => Some("Edit Item"),
        }
    }

    pub fn form(&self) -> Option<&FormState> {
        match self {
            ModalState::Closed => None,
            ModalState::AddOpen(form) | ModalState::EditOpen { form, .. } => Some(form),
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        match self {
            ModalState::Closed => None,
            ModalState::AddOpen(form) | ModalState::EditOpen { form, .. } => Some(form),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitstock_inventory::seed_items;

    #[test]
    fn edit_form_is_stringified_copy() {
        let whey = &seed_items()[1];
        let form = FormState::from_item(whey);
        assert_eq!(form.get(Field::Stock), "50");
        assert_eq!(form.get(Field::UnitPrice), "59.99");
        assert_eq!(form.get(Field::ExpiryDate), "2025-06-30");
    }

    #[test]
    fn expiry_follows_category() {
        let schema = CategorySchema::default();
        let mut form = FormState::blank();
        form.set(Field::Category, "Apparel");
        form.set(Field::ExpiryDate, "2026-01-01");
        assert!(!form.visible_fields(&schema).contains(&Field::ExpiryDate));
        assert_eq!(form.to_fields(&schema).raw(Field::ExpiryDate), None);

        form.set(Field::Category, "Supplements");
        assert!(form.visible_fields(&schema).contains(&Field::ExpiryDate));
        assert_eq!(
            form.to_fields(&schema).raw(Field::ExpiryDate),
            Some("2026-01-01")
        );
    }

    #[test]
    fn blank_form_submits_blank_values() {
        let fields = FormState::blank().to_fields(&CategorySchema::default());
        assert_eq!(fields.raw(Field::Name), Some(""));
        assert_eq!(fields.value(Field::Name), None);
    }

    #[test]
    fn modal_exposes_its_form() {
        let mut modal = ModalState::AddOpen(FormState::blank());
        assert!(modal.is_open());
        assert_eq!(modal.title(), Some("Add Item"));
        modal.form_mut().unwrap().set(Field::Name, "Belt");
        assert_eq!(modal.form().unwrap().get(Field::Name), "Belt");
        assert!(!ModalState::Closed.is_open());
    }
}
