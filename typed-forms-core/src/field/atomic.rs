//! The atomic field variant: one independent cell per channel.

use std::fmt::{self, Debug};

use super::{ChangeCallback, ErrorCallback, Field, TouchedCallback};
use crate::reactive::{Observable, Subscription};

/// A field whose value, error and touched flag are three separate
/// [`Observable`] cells.
///
/// Starts with no error and untouched. Cloning yields another handle onto
/// the same three cells.
pub struct AtomicField<V, E = String>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    value: Observable<V>,
    error: Observable<Option<E>>,
    touched: Observable<bool>,
}

impl<V, E> AtomicField<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new(initial: V) -> Self {
        Self {
            value: Observable::new(initial),
            error: Observable::new(None),
            touched: Observable::new(false),
        }
    }
}

/// Factory for [`AtomicField`], usable directly as a field schema factory.
///
/// ```rust
/// use typed_forms_core::field::{atomic, create_field};
///
/// let schema = create_field(atomic::<String, String>);
/// ```
pub fn atomic<V, E>(initial: V) -> AtomicField<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    AtomicField::new(initial)
}

impl<V, E> Field for AtomicField<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Value = V;
    type Error = E;

    fn value(&self) -> V {
        self.value.get()
    }

    fn set_value(&self, value: V) {
        self.value.set(value);
    }

    fn subscribe_value(&self, callback: ChangeCallback<V>) -> Subscription {
        self.value.subscribe(callback)
    }

    fn error(&self) -> Option<E> {
        self.error.get()
    }

    fn set_error(&self, error: Option<E>) {
        self.error.set(error);
    }

    fn subscribe_error(&self, callback: ErrorCallback<E>) -> Subscription {
        self.error
            .subscribe(move |error: &Option<E>| callback(error.as_ref()))
    }

    fn is_touched(&self) -> bool {
        self.touched.get()
    }

    fn touch(&self) {
        self.touched.set(true);
    }

    fn subscribe_touched(&self, callback: TouchedCallback) -> Subscription {
        self.touched.subscribe(move |touched: &bool| callback(*touched))
    }
}

impl<V, E> Clone for AtomicField<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            error: self.error.clone(),
            touched: self.touched.clone(),
        }
    }
}

impl<V, E> Debug for AtomicField<V, E>
where
    V: Clone + Send + Sync + Debug + 'static,
    E: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicField")
            .field("value", &self.value.get())
            .field("error", &self.error.get())
            .field("touched", &self.touched.get())
            .finish()
    }
}
