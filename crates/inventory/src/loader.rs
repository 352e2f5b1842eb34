//! Sources for the initial collection.
//!
//! The store never knows where its records come from; it awaits a `Loader` once at
//! startup. The mock loader stands in for `GET /inventory`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use fitstock_core::{DomainError, DomainResult, InventoryItemId};

use crate::item::InventoryItem;
use crate::validation::ValidatedItem;

#[async_trait]
pub trait Loader: Send + Sync {
    /// Fetch the full, ordered collection.
    async fn fetch_all(&self) -> DomainResult<Vec<InventoryItem>>;
}

/// Simulated backend: waits `delay`, then returns a fixed list.
#[derive(Debug, Clone)]
pub struct MockLoader {
    delay: Duration,
    items: Vec<InventoryItem>,
}

impl MockLoader {
    pub fn new(delay: Duration, items: Vec<InventoryItem>) -> Self {
        Self { delay, items }
    }

    /// The built-in demo catalogue.
    pub fn seeded(delay: Duration) -> Self {
        Self::new(delay, seed_items())
    }
}

#[async_trait]
impl Loader for MockLoader {
    async fn fetch_all(&self) -> DomainResult<Vec<InventoryItem>> {
        tokio::time::sleep(self.delay).await;
        Ok(self.items.clone())
    }
}

/// Reads a JSON array of records (camelCase keys) from disk. Read-only.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Loader for JsonFileLoader {
    async fn fetch_all(&self) -> DomainResult<Vec<InventoryItem>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DomainError::load(format!("{}: {e}", self.path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| DomainError::load(format!("{}: {e}", self.path.display())))
    }
}

/// Always fails; exercises the failed-load path.
#[derive(Debug, Clone)]
pub struct FailingLoader {
    reason: String,
}

impl FailingLoader {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Loader for FailingLoader {
    async fn fetch_all(&self) -> DomainResult<Vec<InventoryItem>> {
        Err(DomainError::load(self.reason.clone()))
    }
}

/// Demo catalogue: one apparel line, one supplement line.
pub fn seed_items() -> Vec<InventoryItem> {
    vec![
        InventoryItem::new(
            InventoryItemId::from_uuid(Uuid::from_u128(1)),
            ValidatedItem {
                name: "GymFreak T-Shirt".to_string(),
                sku: "GF-TS-001".to_string(),
                category: "Apparel".to_string(),
                stock: 100,
                reorder_point: 20,
                unit_price: Decimal::new(2499, 2),
                supplier: "FitWear Co.".to_string(),
                expiry_date: None,
            },
            date(2024, 1, 15),
        ),
        InventoryItem::new(
            InventoryItemId::from_uuid(Uuid::from_u128(2)),
            ValidatedItem {
                name: "Whey Protein Isolate".to_string(),
                sku: "SUP-WP-001".to_string(),
                category: "Supplements".to_string(),
                stock: 50,
                reorder_point: 15,
                unit_price: Decimal::new(5999, 2),
                supplier: "NutriSource".to_string(),
                expiry_date: Some(date(2025, 6, 30)),
            },
            date(2024, 1, 10),
        ),
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}
