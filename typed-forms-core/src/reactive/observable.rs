//! Observable Value Cell
//!
//! An `Observable` is a single mutable slot with change notification. It is
//! the building block for every channel of a form field: the value, the
//! validation error and the touched flag each live in their own cell.
//!
//! # Notification Semantics
//!
//! 1. `set` replaces the value unconditionally. Writing the value that is
//!    already stored still notifies.
//!
//! 2. Subscribers run synchronously, in registration order, before `set`
//!    returns. Each receives the value that was written.
//!
//! 3. Fan-out iterates a snapshot of the subscriber list taken when the
//!    round starts. A subscriber may subscribe, dispose (itself or others)
//!    or call `set` again on any cell without corrupting the round: new
//!    registrations first fire on the next `set`, and registrations disposed
//!    mid-round still see the round in progress.
//!
//! # Thread Safety
//!
//! The value sits behind a `RwLock` and the subscriber list behind a `Mutex`.
//! Neither lock is held while callbacks run, which is what makes re-entrant
//! calls from inside a callback safe.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use smallvec::SmallVec;

use super::subscriber::{Detach, SubscriberId, Subscription};

/// Counter for generating unique cell IDs.
static CELL_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_cell_id() -> u64 {
    CELL_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Most fields have one or two listeners per channel (form wiring plus a view).
type Subscribers<T> = SmallVec<[(SubscriberId, Callback<T>); 2]>;

struct Inner<T> {
    id: u64,
    value: RwLock<T>,
    subscribers: Mutex<Subscribers<T>>,
}

impl<T> Detach for Inner<T>
where
    T: Send + Sync,
{
    fn detach(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers.lock();
        match subscribers.iter().position(|(existing, _)| *existing == id) {
            Some(index) => {
                subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    fn is_attached(&self, id: SubscriberId) -> bool {
        self.subscribers
            .lock()
            .iter()
            .any(|(existing, _)| *existing == id)
    }
}

/// A mutable value with synchronous change notification.
///
/// Cloning an `Observable` produces another handle onto the same cell.
///
/// # Example
///
/// ```rust
/// use typed_forms_core::reactive::Observable;
///
/// let count = Observable::new(0);
/// let subscription = count.subscribe(|value| println!("count is {value}"));
///
/// count.set(5); // prints "count is 5"
/// subscription.dispose();
/// count.set(6); // prints nothing
/// ```
pub struct Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    inner: Arc<Inner<T>>,
}

impl<T> Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new cell holding `value`, with no subscribers.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                id: next_cell_id(),
                value: RwLock::new(value),
                subscribers: Mutex::new(SmallVec::new()),
            }),
        }
    }

    /// The cell's process-unique ID.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Replace the value and notify every subscriber with it.
    pub fn set(&self, value: T) {
        let written = value.clone();
        *self.inner.value.write() = value;
        self.notify(&written);
    }

    /// Replace the value with one computed from the current value.
    ///
    /// Notifies exactly like [`set`](Self::set). No lock is held while `f`
    /// runs, so `f` may read or write this cell.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let current = self.get();
        self.set(f(&current));
    }

    /// Register a callback invoked with the new value on every `set`.
    ///
    /// Every call creates an independent registration, even for a callback
    /// that is already registered.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriberId::new();
        let callback: Callback<T> = Arc::new(callback);
        self.inner.subscribers.lock().push((id, callback));
        tracing::trace!(cell = self.inner.id, subscriber = %id, "subscribed");

        let source: Weak<dyn Detach> = Arc::downgrade(&self.inner) as Weak<dyn Detach>;
        Subscription::new(id, source)
    }

    /// Get the number of live registrations.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    fn notify(&self, value: &T) {
        // Snapshot so callbacks can touch the subscriber list freely.
        let snapshot: Subscribers<T> = self.inner.subscribers.lock().clone();
        tracing::trace!(
            cell = self.inner.id,
            subscribers = snapshot.len(),
            "notifying"
        );
        for (_, callback) in snapshot.iter() {
            callback(value);
        }
    }
}

impl<T> Clone for Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Debug for Observable<T>
where
    T: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("id", &self.inner.id)
            .field("value", &*self.inner.value.read())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}
