//! Typed publish/subscribe signal.
//!
//! A [`Signal`] is an explicit registry of observers invoked sequentially,
//! in registration order, for every emission. It is the one notification
//! primitive in Transom — channel-change events and window-registry
//! lifecycle events both travel over it.
//!
//! ## Delivery contract
//!
//! - Observers run **sequentially in registration order** per emission;
//!   delivery to the next observer starts only after the previous one
//!   settled, even when observers suspend.
//! - A failing observer is logged and skipped — it never prevents delivery
//!   to later observers (fail-open, like the hook engine).
//! - The observer set is snapshotted before delivery begins, so
//!   subscribing or unsubscribing from within an observer affects the next
//!   emission, not the in-flight one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use futures::future::BoxFuture;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::warn;

/// Error returned by a failing observer.
///
/// Carries a message for the log line; emission continues regardless.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ObserverError(String);

impl ObserverError {
    /// Create an observer error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<String> for ObserverError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for ObserverError {
    fn from(message: &str) -> Self {
        Self(message.to_owned())
    }
}

/// Handle returned by [`Signal::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// An asynchronous observer of signal emissions.
#[async_trait]
pub trait Observer<T: Send + Sync>: Send + Sync {
    /// Handle one emitted event.
    ///
    /// Errors are logged by the signal and do not stop delivery to other
    /// observers.
    async fn notify(&self, event: &T) -> Result<(), ObserverError>;
}

/// Boxed async closure form of an observer callback.
pub type ObserverFn<T> =
    dyn Fn(T) -> BoxFuture<'static, Result<(), ObserverError>> + Send + Sync;

struct FnObserver<T> {
    callback: Box<ObserverFn<T>>,
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Observer<T> for FnObserver<T> {
    async fn notify(&self, event: &T) -> Result<(), ObserverError> {
        (self.callback)(event.clone()).await
    }
}

/// A multi-subscriber event stream with ordered, failure-isolated delivery.
pub struct Signal<T> {
    next_id: AtomicU64,
    observers: RwLock<Vec<(SubscriptionId, Arc<dyn Observer<T>>)>>,
}

impl<T: Send + Sync> Signal<T> {
    /// Create a signal with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Register an observer. Observers are invoked in registration order.
    pub fn subscribe(&self, observer: Arc<dyn Observer<T>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((id, observer));
        id
    }

    /// Remove a previously registered observer.
    ///
    /// Returns `true` if the subscription existed and was removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(sub, _)| *sub != id);
        observers.len() < before
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    /// Deliver an event to every observer, sequentially, in registration
    /// order.
    ///
    /// The observer set is snapshotted up front; an observer that fails is
    /// logged and delivery continues with the next one.
    pub async fn emit(&self, event: &T) {
        let snapshot: Vec<(SubscriptionId, Arc<dyn Observer<T>>)> =
            self.observers.read().clone();
        for (id, observer) in snapshot {
            if let Err(e) = observer.notify(event).await {
                warn!(subscription = %id, error = %e, "signal observer failed");
            }
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    /// Register an async closure as an observer.
    ///
    /// The closure receives a clone of the emitted event.
    pub fn subscribe_fn<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(T) -> BoxFuture<'static, Result<(), ObserverError>> + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(FnObserver {
            callback: Box::new(callback),
        }))
    }
}

impl<T: Send + Sync> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("observer_count", &self.observers.read().len())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
