//! Change notifications.
//!
//! A stat exposes two independent signals: one fires when its cached value
//! is recomputed, the other when its set of modifiers changes. Subscribers
//! are plain callbacks invoked synchronously, in subscription order, on the
//! thread that caused the change.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    fn next() -> Self {
        Self(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Payload of the modifiers-changed signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifiersChanged {
    /// Number of modifiers on the stat after the change.
    pub modifier_count: usize,
}

type Callback<T> = Box<dyn FnMut(&T) + Send + Sync>;

/// A list of callbacks notified with a `&T`.
///
/// # Examples
///
/// ```rust
/// use modstat::events::Signal;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let mut signal = Signal::<f64>::new();
/// let seen = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&seen);
/// let id = signal.subscribe(move |_value| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// signal.emit(&1.0);
/// assert!(signal.unsubscribe(id));
/// signal.emit(&2.0);
///
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub struct Signal<T> {
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T> Signal<T> {
    /// Create a signal with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Add a callback. It stays subscribed until [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId::next();
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if `id` is not subscribed here.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Call every subscriber with `payload`.
    pub fn emit(&mut self, payload: &T) {
        for (_, callback) in &mut self.subscribers {
            callback(payload);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
