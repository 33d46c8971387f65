//! Subscriber ids and the disposer handle returned by every subscription.
//!
//! Each registration on an [`Observable`](super::Observable) is identified by
//! its own [`SubscriberId`], so the same callback registered twice yields two
//! independent registrations that must be disposed independently.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Weak;

/// Unique identifier for a single subscription.
///
/// Minted once per registration, never per callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Generate a new unique subscriber ID.
    ///
    /// Uses an atomic counter to ensure uniqueness across threads.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// Something a subscription can be detached from.
///
/// Implemented by the shared state of an observable cell so that
/// [`Subscription`] does not need to carry the cell's value type.
pub(crate) trait Detach: Send + Sync {
    /// Remove the registration with the given id.
    ///
    /// Returns `false` if no such registration exists (already removed).
    fn detach(&self, id: SubscriberId) -> bool;

    /// Whether the registration with the given id is still present.
    fn is_attached(&self, id: SubscriberId) -> bool;
}

/// Disposer for one registration.
///
/// Calling [`dispose`](Self::dispose) removes exactly the registration this
/// handle was returned for. Disposing twice is a no-op, as is disposing after
/// the cell itself has been dropped.
///
/// Dropping a `Subscription` does *not* dispose it; the callback stays
/// registered for as long as the cell lives.
#[derive(Clone)]
pub struct Subscription {
    id: SubscriberId,
    source: Weak<dyn Detach>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriberId, source: Weak<dyn Detach>) -> Self {
        Self { id, source }
    }

    /// The id of the registration this handle controls.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Remove the registration. Idempotent.
    pub fn dispose(&self) {
        let Some(source) = self.source.upgrade() else {
            return;
        };
        if source.detach(self.id) {
            tracing::trace!(subscriber = %self.id, "subscription disposed");
        }
    }

    /// Whether the registration is still attached to a live cell.
    pub fn is_active(&self) -> bool {
        self.source
            .upgrade()
            .map(|source| source.is_attached(self.id))
            .unwrap_or(false)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
