//! Typed Forms Core
//!
//! This crate provides a small reactive state container for form fields.
//! It implements:
//!
//! - Observable cells with synchronous, ordered change notification
//! - Fields: a value, a validation error and a touched flag, each observable
//! - Field and form schemas that describe how to build and validate fields
//! - Forms that re-validate on every change and gate submission on validity
//!
//! Rendering is left to the caller: a view subscribes to a field's channels
//! and calls `set_value`/`touch` in response to input.
//!
//! # Architecture
//!
//! - `reactive`: the observable cell and its subscription handles
//! - `field`: the `Field` trait, the atomic field and field schemas
//! - `form`: form schemas, live forms and submission
//!
//! # Example
//!
//! ```rust
//! use typed_forms_core::prelude::*;
//!
//! let schema = describe_form([
//!     (
//!         "email",
//!         create_field(atomic::<String, String>).with_validator(|value: &String| {
//!             (!value.contains('@')).then(|| "Enter a valid email".to_string())
//!         }),
//!     ),
//!     ("nickname", create_field(atomic::<String, String>)),
//! ])
//! .unwrap();
//!
//! let form = create_form(
//!     &schema,
//!     [("email", String::new()), ("nickname", String::new())],
//! )
//! .unwrap();
//!
//! // Blocked: the email is invalid. Both fields are now touched.
//! assert!(!form.submit(|_| unreachable!()));
//!
//! form["email"].set_value("ada@example.com".to_string());
//! assert!(form.submit(|values| println!("signing up {}", values["email"])));
//! ```

pub mod field;
pub mod form;
pub mod reactive;

pub mod prelude {
    pub use crate::field::{
        atomic, create_field, create_field_with, AtomicField, DynField, Field, FieldOptions,
        FieldSchema, FieldState,
    };
    pub use crate::form::{
        create_form, describe_form, Form, FormError, FormSchema, FormValues,
    };
    pub use crate::reactive::{Observable, Subscription};
}
