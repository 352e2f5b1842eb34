//! Per-category field schema.
//!
//! Some fields only apply to certain categories (an expiry date on a T-shirt is
//! meaningless). The form decides what to show and the validator decides what to
//! collect by asking the same schema.

use std::collections::{BTreeMap, BTreeSet};

use crate::field::Field;

pub const SUPPLEMENTS: &str = "Supplements";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySchema {
    conditional: BTreeMap<String, BTreeSet<Field>>,
}

impl CategorySchema {
    /// A schema where no category admits any conditional field.
    pub fn empty() -> Self {
        Self {
            conditional: BTreeMap::new(),
        }
    }

    /// Allow `field` on records of `category` (exact, case-sensitive match).
    pub fn with_field(mut self, category: impl Into<String>, field: Field) -> Self {
        self.conditional
            .entry(category.into())
            .or_default()
            .insert(field);
        self
    }

    /// Whether `field` applies to a record of `category`.
    ///
    /// Unconditional fields apply everywhere.
    pub fn admits(&self, category: &str, field: Field) -> bool {
        if !field.is_conditional() {
            return true;
        }
        self.conditional
            .get(category)
            .is_some_and(|fields| fields.contains(&field))
    }

    /// Fields to present for `category`, in form order.
    pub fn fields_for(&self, category: &str) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.admits(category, *field))
            .collect()
    }
}

impl Default for CategorySchema {
    fn default() -> Self {
        Self::empty().with_field(SUPPLEMENTS, Field::ExpiryDate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_only_for_supplements() {
        let schema = CategorySchema::default();
        assert!(schema.admits("Supplements", Field::ExpiryDate));
        assert!(!schema.admits("Apparel", Field::ExpiryDate));
        assert!(!schema.admits("supplements", Field::ExpiryDate));
        assert!(schema.admits("Apparel", Field::Supplier));
    }

    #[test]
    fn fields_for_keeps_form_order() {
        let schema = CategorySchema::default();
        assert_eq!(schema.fields_for("Apparel").len(), 7);
        assert_eq!(schema.fields_for("Supplements").last(), Some(&Field::ExpiryDate));
    }

    #[test]
    fn custom_categories_can_opt_in() {
        let schema = CategorySchema::default().with_field("Snacks", Field::ExpiryDate);
        assert!(schema.admits("Snacks", Field::ExpiryDate));
        assert!(CategorySchema::empty().fields_for("Supplements").len() == 7);
    }
}
