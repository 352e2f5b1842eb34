//! Editable fields and the stringly input bag the form hands to the store.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An editable field of an inventory record.
///
/// `id` and `last_restocked` are deliberately absent: neither is user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Sku,
    Category,
    Stock,
    ReorderPoint,
    UnitPrice,
    Supplier,
    ExpiryDate,
}

impl Field {
    /// Form order.
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Sku,
        Field::Category,
        Field::Stock,
        Field::ReorderPoint,
        Field::UnitPrice,
        Field::Supplier,
        Field::ExpiryDate,
    ];

    /// Wire/console key (camelCase, matches the serialized record).
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Sku => "sku",
            Field::Category => "category",
            Field::Stock => "stock",
            Field::ReorderPoint => "reorderPoint",
            Field::UnitPrice => "unitPrice",
            Field::Supplier => "supplier",
            Field::ExpiryDate => "expiryDate",
        }
    }

    /// Human label used in validation messages and form rendering.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Sku => "sku",
            Field::Category => "category",
            Field::Stock => "stock",
            Field::ReorderPoint => "reorder point",
            Field::UnitPrice => "unit price",
            Field::Supplier => "supplier",
            Field::ExpiryDate => "expiry date",
        }
    }

    /// Fields whose presence depends on the record's category.
    pub fn is_conditional(self) -> bool {
        matches!(self, Field::ExpiryDate)
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown field `{0}`")]
pub struct ParseFieldError(pub String);

impl FromStr for Field {
    type Err = ParseFieldError;

    /// Accepts the camelCase key, snake_case, or kebab-case, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        Field::ALL
            .into_iter()
            .find(|field| field.key().to_lowercase() == normalized)
            .ok_or_else(|| ParseFieldError(s.to_string()))
    }
}

/// Raw field values as typed into the form.
///
/// `None` means "not provided". For create, a blank string counts as missing too.
/// For update, `None` keeps the stored value while `Some("")` asks to clear it
/// (allowed for optional fields only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemFields {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub stock: Option<String>,
    pub reorder_point: Option<String>,
    pub unit_price: Option<String>,
    pub supplier: Option<String>,
    pub expiry_date: Option<String>,
}

impl ItemFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Raw value as provided (may be blank).
    pub fn raw(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn value(&self, field: Field) -> Option<&str> {
        self.raw(field).map(str::trim).filter(|v| !v.is_empty())
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Name => &self.name,
            Field::Sku => &self.sku,
            Field::Category => &self.category,
            Field::Stock => &self.stock,
            Field::ReorderPoint => &self.reorder_point,
            Field::UnitPrice => &self.unit_price,
            Field::Supplier => &self.supplier,
            Field::ExpiryDate => &self.expiry_date,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Sku => &mut self.sku,
            Field::Category => &mut self.category,
            Field::Stock => &mut self.stock,
            Field::ReorderPoint => &mut self.reorder_point,
            Field::UnitPrice => &mut self.unit_price,
            Field::Supplier => &mut self.supplier,
            Field::ExpiryDate => &mut self.expiry_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parses_common_spellings() {
        assert_eq!("reorderPoint".parse::<Field>().unwrap(), Field::ReorderPoint);
        assert_eq!("reorder_point".parse::<Field>().unwrap(), Field::ReorderPoint);
        assert_eq!("UNIT-PRICE".parse::<Field>().unwrap(), Field::UnitPrice);
        assert!("colour".parse::<Field>().is_err());
    }

    #[test]
    fn blank_values_read_as_absent() {
        let fields = ItemFields::new()
            .with(Field::Name, "  ")
            .with(Field::Sku, " GF-1 ");
        assert_eq!(fields.raw(Field::Name), Some("  "));
        assert_eq!(fields.value(Field::Name), None);
        assert_eq!(fields.value(Field::Sku), Some("GF-1"));
        assert_eq!(fields.value(Field::Stock), None);
    }
}
