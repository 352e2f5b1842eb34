//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of an inventory record.
///
/// Opaque to callers; immutable once assigned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryItemId(Uuid);

impl InventoryItemId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered), so ids derive from the creation time. Prefer
    /// passing IDs explicitly in tests for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InventoryItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for InventoryItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for InventoryItemId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<InventoryItemId> for Uuid {
    fn from(value: InventoryItemId) -> Self {
        value.0
    }
}

impl FromStr for InventoryItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s.trim())
            .map_err(|e| DomainError::invalid_id(format!("InventoryItemId: {e}")))?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_display() {
        let id = InventoryItemId::from_uuid(Uuid::from_u128(42));
        let parsed: InventoryItemId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "not-an-id".parse::<InventoryItemId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn new_ids_are_distinct() {
        let a = InventoryItemId::new();
        let b = InventoryItemId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn serializes_as_bare_uuid() {
        let id = InventoryItemId::from_uuid(Uuid::from_u128(1));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000001\"");
    }
}
