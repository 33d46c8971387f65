//! Form Fields
//!
//! A field is three independently observable channels bundled around one
//! form input:
//!
//! - the **value** the user edits,
//! - the **error** produced by the field's validator (`None` when valid),
//! - the **touched** flag, set once the user (or a submit) has interacted
//!   with the field.
//!
//! Each setter notifies only its own channel. Writing a value does not by
//! itself touch the error or touched channels; re-validation on change is
//! wired up by the [`Form`](crate::form::Form) that owns the field.
//!
//! The [`Field`] trait is the capability set the form layer depends on.
//! [`AtomicField`] is the stock implementation, built from three plain
//! [`Observable`](crate::reactive::Observable) cells. Variants with the same
//! value and error types can share a form through [`DynField`].

mod atomic;
mod schema;

use std::sync::Arc;

use serde::Serialize;

use crate::reactive::Subscription;

pub use atomic::{atomic, AtomicField};
pub use schema::{create_field, create_field_with, FieldOptions, FieldSchema, Validator};

/// Boxed value-change callback, as taken by [`Field::subscribe_value`].
pub type ChangeCallback<V> = Box<dyn Fn(&V) + Send + Sync>;

/// Boxed error-change callback.
pub type ErrorCallback<E> = Box<dyn Fn(Option<&E>) + Send + Sync>;

/// Boxed touched-change callback.
pub type TouchedCallback = Box<dyn Fn(bool) + Send + Sync>;

/// A shared, type-erased field. Lets one form hold different field variants
/// with the same value and error types.
pub type DynField<V, E = String> = Arc<dyn Field<Value = V, Error = E>>;

/// The capability set of a form field.
///
/// Every setter replaces its channel's value unconditionally and notifies
/// that channel's subscribers synchronously, in registration order, even
/// when the new value equals the old one.
///
/// Implementors provide the `subscribe_*` methods, which take boxed
/// callbacks so the trait stays usable as `dyn Field`. The `on_*` methods
/// are the generic conveniences built on top of them.
pub trait Field: Send + Sync + 'static {
    /// The type of value held by the field.
    type Value: Clone + Send + Sync + 'static;

    /// The type of validation error the field can hold.
    type Error: Clone + Send + Sync + 'static;

    /// Current value.
    fn value(&self) -> Self::Value;

    /// Replace the value and notify change subscribers.
    fn set_value(&self, value: Self::Value);

    /// Subscribe a boxed callback to value changes.
    fn subscribe_value(&self, callback: ChangeCallback<Self::Value>) -> Subscription;

    /// Current validation error, `None` when the field is valid.
    fn error(&self) -> Option<Self::Error>;

    /// Replace the error and notify error subscribers.
    fn set_error(&self, error: Option<Self::Error>);

    /// Subscribe a boxed callback to error changes.
    fn subscribe_error(&self, callback: ErrorCallback<Self::Error>) -> Subscription;

    /// Whether the field has been touched.
    fn is_touched(&self) -> bool;

    /// Mark the field as touched and notify touched subscribers.
    ///
    /// Notifies with `true` even if the field was already touched.
    fn touch(&self);

    /// Subscribe a boxed callback to touched-flag changes.
    fn subscribe_touched(&self, callback: TouchedCallback) -> Subscription;

    /// Subscribe to value changes.
    fn on_change<C>(&self, callback: C) -> Subscription
    where
        C: Fn(&Self::Value) + Send + Sync + 'static,
        Self: Sized,
    {
        self.subscribe_value(Box::new(callback))
    }

    /// Subscribe to error changes.
    fn on_error_change<C>(&self, callback: C) -> Subscription
    where
        C: Fn(Option<&Self::Error>) + Send + Sync + 'static,
        Self: Sized,
    {
        self.subscribe_error(Box::new(callback))
    }

    /// Subscribe to touched-flag changes.
    fn on_touched_change<C>(&self, callback: C) -> Subscription
    where
        C: Fn(bool) + Send + Sync + 'static,
        Self: Sized,
    {
        self.subscribe_touched(Box::new(callback))
    }

    /// Snapshot all three channels at once.
    fn state(&self) -> FieldState<Self::Value, Self::Error> {
        FieldState {
            value: self.value(),
            error: self.error(),
            touched: self.is_touched(),
        }
    }
}

impl<F> Field for Arc<F>
where
    F: Field + ?Sized,
{
    type Value = F::Value;
    type Error = F::Error;

    fn value(&self) -> F::Value {
        (**self).value()
    }

    fn set_value(&self, value: F::Value) {
        (**self).set_value(value);
    }

    fn subscribe_value(&self, callback: ChangeCallback<F::Value>) -> Subscription {
        (**self).subscribe_value(callback)
    }

    fn error(&self) -> Option<F::Error> {
        (**self).error()
    }

    fn set_error(&self, error: Option<F::Error>) {
        (**self).set_error(error);
    }

    fn subscribe_error(&self, callback: ErrorCallback<F::Error>) -> Subscription {
        (**self).subscribe_error(callback)
    }

    fn is_touched(&self) -> bool {
        (**self).is_touched()
    }

    fn touch(&self) {
        (**self).touch();
    }

    fn subscribe_touched(&self, callback: TouchedCallback) -> Subscription {
        (**self).subscribe_touched(callback)
    }
}

/// Point-in-time copy of a field's value, error and touched flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldState<V, E> {
    pub value: V,
    pub error: Option<E>,
    pub touched: bool,
}

impl<V, E> FieldState<V, E> {
    /// The error, but only once the field has been touched.
    ///
    /// Views use this to avoid flagging inputs the user has not reached yet.
    pub fn visible_error(&self) -> Option<&E> {
        if self.touched {
            self.error.as_ref()
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}
