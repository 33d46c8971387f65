//! Reactive Primitives
//!
//! This module implements the observable cell that every form field is built
//! from, together with the subscription handles it hands out.
//!
//! # Concepts
//!
//! ## Observables
//!
//! An [`Observable`] is a container for mutable state. Every write replaces
//! the stored value and synchronously notifies each registered callback with
//! the value that was written. There is no equality check, no batching and
//! no deferral: a `set` has finished notifying by the time it returns.
//!
//! ## Subscriptions
//!
//! [`Observable::subscribe`] returns a [`Subscription`], the disposer for that
//! one registration. Registrations are identified by a [`SubscriberId`], not
//! by the callback, so registering the same closure twice creates two
//! registrations that are disposed separately.
//!
//! # Implementation Notes
//!
//! Unlike a dependency-tracking signal runtime there is no ambient context or
//! global registry here. Each cell owns its subscriber list outright and
//! notification is an explicit fan-out over a snapshot of that list.

mod observable;
mod subscriber;

pub use observable::Observable;
pub use subscriber::{SubscriberId, Subscription};
