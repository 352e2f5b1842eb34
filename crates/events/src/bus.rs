//! Publish/subscribe abstraction.
//!
//! A bus fans each published message out to every live subscription (broadcast
//! semantics). Delivery happens in publish order per subscription. Subscriptions that
//! have been dropped are pruned on the next publish.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};

/// A subscription to a bus.
///
/// Designed for single-threaded consumption: a view drains it from its own event
/// loop, typically with [`Subscription::drain`] right before rendering.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Take every message currently queued, oldest first. Never blocks.
    pub fn drain(&self) -> Vec<M> {
        let mut out = Vec::new();
        while let Ok(message) = self.receiver.try_recv() {
            out.push(message);
        }
        out
    }
}

/// Domain-agnostic event bus.
///
/// `Send + Sync` so a store holding a bus can be moved into whatever runtime owns the
/// UI loop, even though publishing itself is synchronous.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
