//! Search and category filtering over the collection.
//!
//! Pure projections, recomputed on every render.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;

/// Selector value meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    /// `"all"` selects everything; any other value is an exact category.
    pub fn parse(selector: &str) -> Self {
        if selector == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Exact(selector.to_string())
        }
    }

    pub fn as_selector(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Exact(category) => category,
        }
    }

    fn matches(&self, item: &InventoryItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Exact(category) => item.category() == category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Sku,
    Stock,
    UnitPrice,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }

    fn compare(&self, a: &InventoryItem, b: &InventoryItem) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
            SortKey::Sku => a.sku().to_lowercase().cmp(&b.sku().to_lowercase()),
            SortKey::Stock => a.stock().cmp(&b.stock()),
            SortKey::UnitPrice => a.unit_price().cmp(&b.unit_price()),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Criteria for the table view.
///
/// With an empty query, `All` categories, and no sort, `apply` returns the collection
/// as-is, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    pub query: String,
    pub category: CategoryFilter,
    pub sort: Option<Sort>,
}

impl InventoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_sort(mut self, sort: Option<Sort>) -> Self {
        self.sort = sort;
        self
    }

    /// Rows where the category matches AND the query is a case-insensitive substring
    /// of name, SKU, or supplier.
    pub fn apply<'a>(&self, items: &'a [InventoryItem]) -> Vec<&'a InventoryItem> {
        let needle = self.query.to_lowercase();
        let mut rows: Vec<&InventoryItem> = items
            .iter()
            .filter(|item| self.category.matches(item) && query_matches(&needle, item))
            .collect();
        if let Some(sort) = self.sort {
            // Stable: equal keys keep collection order.
            rows.sort_by(|a, b| sort.compare(a, b));
        }
        rows
    }
}

fn query_matches(needle: &str, item: &InventoryItem) -> bool {
    needle.is_empty()
        || [item.name(), item.sku(), item.supplier()]
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(needle))
}

/// `"all"` followed by each distinct category in first-appearance order.
pub fn category_options(items: &[InventoryItem]) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        if !options[1..].iter().any(|c| c == item.category()) {
            options.push(item.category().to_string());
        }
    }
    options
}
