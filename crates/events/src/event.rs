use chrono::{DateTime, Utc};

/// A domain-agnostic change event.
///
/// Events are facts: immutable, cheap to clone, and delivered to every subscriber.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "inventory.item.created").
    fn event_type(&self) -> &'static str;

    /// When the change happened.
    fn occurred_at(&self) -> DateTime<Utc>;
}
