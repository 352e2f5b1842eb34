use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fitstock_core::{Entity, InventoryItemId};

use crate::field::Field;
use crate::schema::CategorySchema;
use crate::validation::{ValidatedItem, ValidatedPatch};

/// One stocked product line.
///
/// Fields are private: `id` and `last_restocked` must survive every update, so the
/// only ways to obtain a changed record go through the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    id: InventoryItemId,
    name: String,
    sku: String,
    category: String,
    stock: u32,
    reorder_point: u32,
    unit_price: Decimal,
    #[serde(default)]
    supplier: String,
    last_restocked: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expiry_date: Option<NaiveDate>,
}

impl InventoryItem {
    /// Build a record from validated input.
    pub fn new(id: InventoryItemId, input: ValidatedItem, last_restocked: NaiveDate) -> Self {
        Self {
            id,
            name: input.name,
            sku: input.sku,
            category: input.category,
            stock: input.stock,
            reorder_point: input.reorder_point,
            unit_price: input.unit_price,
            supplier: input.supplier,
            last_restocked,
            expiry_date: input.expiry_date,
        }
    }

    pub fn id_typed(&self) -> InventoryItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn reorder_point(&self) -> u32 {
        self.reorder_point
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn last_restocked(&self) -> NaiveDate {
        self.last_restocked
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }

    /// At or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.reorder_point
    }

    /// Stringified value of an editable field, as an edit form would show it.
    pub fn display_value(&self, field: Field) -> String {
        match field {
            Field::Name => self.name.clone(),
            Field::Sku => self.sku.clone(),
            Field::Category => self.category.clone(),
            Field::Stock => self.stock.to_string(),
            Field::ReorderPoint => self.reorder_point.to_string(),
            Field::UnitPrice => self.unit_price.to_string(),
            Field::Supplier => self.supplier.clone(),
            Field::ExpiryDate => self
                .expiry_date
                .map(|d| d.format(crate::validation::DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    /// Overlay a patch. `id` and `last_restocked` are carried over untouched, and an
    /// expiry date the resulting category does not admit is dropped.
    pub(crate) fn merged(&self, patch: ValidatedPatch, schema: &CategorySchema) -> Self {
        let category = patch.category.unwrap_or_else(|| self.category.clone());
        let expiry_date = patch.expiry_date.unwrap_or(self.expiry_date);
        let expiry_date = if schema.admits(&category, Field::ExpiryDate) {
            expiry_date
        } else {
            None
        };

        Self {
            id: self.id,
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            sku: patch.sku.unwrap_or_else(|| self.sku.clone()),
            category,
            stock: patch.stock.unwrap_or(self.stock),
            reorder_point: patch.reorder_point.unwrap_or(self.reorder_point),
            unit_price: patch.unit_price.unwrap_or(self.unit_price),
            supplier: patch.supplier.unwrap_or_else(|| self.supplier.clone()),
            last_restocked: self.last_restocked,
            expiry_date,
        }
    }

    /// Drop an expiry date the record's category does not admit.
    pub(crate) fn conformed(mut self, schema: &CategorySchema) -> Self {
        if self.expiry_date.is_some() && !schema.admits(&self.category, Field::ExpiryDate) {
            tracing::warn!(
                item_id = %self.id,
                category = %self.category,
                "dropping expiry date not admitted by category"
            );
            self.expiry_date = None;
        }
        self
    }

    /// Structural problems in a record that did not come through validation
    /// (e.g. a loaded seed file).
    pub(crate) fn defects(&self) -> Vec<String> {
        let mut defects = Vec::new();
        for (field, value) in [
            (Field::Name, &self.name),
            (Field::Sku, &self.sku),
            (Field::Category, &self.category),
        ] {
            if value.trim().is_empty() {
                defects.push(format!("{} is empty", field.label()));
            }
        }
        if self.unit_price.is_sign_negative() {
            defects.push("unit price is negative".to_string());
        }
        defects
    }
}

impl Entity for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
