//! Forms
//!
//! A [`Form`] is a fixed set of named, live fields built from a
//! [`FormSchema`] and a set of initial values.
//!
//! # Lifecycle
//!
//! 1. [`create_form`] builds every field from its schema's factory and the
//!    matching initial value. A missing or unknown initial value is a
//!    [`FormError`], never a silently defaulted field.
//!
//! 2. Every field is validated once with its initial value, before any
//!    change listener is attached.
//!
//! 3. Each field's value channel is wired to re-run that field's validator
//!    on every change. Validation never cascades to other fields.
//!
//! # Submission
//!
//! [`Form::submit`] touches every field, then hands a snapshot of the values
//! to the submitter only if no field holds an error. A blocked submission is
//! not an error; callers inspect the fields' error channels to react.

mod error;
mod schema;

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::field::{Field, FieldState};
use crate::reactive::Subscription;

pub use error::{FormError, Result};
pub use schema::{describe_form, FormSchema};

/// Snapshot of every field's value, keyed by field name in schema order.
pub type FormValues<V> = IndexMap<String, V>;

/// A live form.
///
/// The set of fields is fixed for the form's lifetime. Dropping the form
/// detaches its validation wiring; field handles obtained through
/// [`fields`](Self::fields) stay usable but are no longer re-validated.
pub struct Form<F: Field> {
    fields: IndexMap<String, Arc<F>>,
    wiring: Vec<Subscription>,
}

/// Build a live form from a schema and initial values.
///
/// Every schema field needs exactly one initial value, and every initial
/// value must name a schema field.
///
/// ```rust
/// use typed_forms_core::field::{atomic, create_field, Field};
/// use typed_forms_core::form::{create_form, describe_form};
///
/// let schema = describe_form([(
///     "name",
///     create_field(atomic::<String, String>)
///         .with_validator(|value: &String| value.is_empty().then(|| "required".to_string())),
/// )])
/// .unwrap();
///
/// let form = create_form(&schema, [("name", String::new())]).unwrap();
/// assert_eq!(form["name"].error().as_deref(), Some("required"));
///
/// form["name"].set_value("Ada".to_string());
/// assert_eq!(form["name"].error(), None);
/// ```
pub fn create_form<F, I, K>(schema: &FormSchema<F>, initial_values: I) -> Result<Form<F>>
where
    F: Field,
    I: IntoIterator<Item = (K, F::Value)>,
    K: Into<String>,
{
    let mut initial: IndexMap<String, F::Value> = IndexMap::new();
    for (name, value) in initial_values {
        let name = name.into();
        if initial.contains_key(&name) {
            return Err(FormError::DuplicateInitialValue(name));
        }
        initial.insert(name, value);
    }

    let mut fields = IndexMap::with_capacity(schema.len());
    for (name, field_schema) in schema.iter() {
        let value = initial
            .shift_remove(name)
            .ok_or_else(|| FormError::MissingInitialValue(name.to_string()))?;
        fields.insert(name.to_string(), Arc::new(field_schema.build(value)));
    }
    if let Some(name) = initial.keys().next() {
        return Err(FormError::UnknownField(name.clone()));
    }

    // Initial validation happens before anything can observe the fields.
    for (name, field_schema) in schema.iter() {
        let field = &fields[name];
        field.set_error(field_schema.validate(&field.value()));
    }

    let mut wiring = Vec::with_capacity(fields.len());
    for (name, field_schema) in schema.iter() {
        let field = &fields[name];
        let weak = Arc::downgrade(field);
        let validate = field_schema.options().validator();
        wiring.push(field.on_change(move |value: &F::Value| {
            if let Some(field) = weak.upgrade() {
                field.set_error(validate(value));
            }
        }));
    }

    tracing::debug!(
        fields = fields.len(),
        invalid = fields.values().filter(|field| field.error().is_some()).count(),
        "form created"
    );

    Ok(Form { fields, wiring })
}

impl<F: Field> Form<F> {
    /// All fields, in schema order.
    pub fn fields(&self) -> &IndexMap<String, Arc<F>> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&F> {
        self.fields.get(name).map(|field| &**field)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Snapshot of every field's current value.
    pub fn values(&self) -> FormValues<F::Value> {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.value()))
            .collect()
    }

    /// The fields currently holding an error, with that error.
    pub fn errors(&self) -> IndexMap<String, F::Error> {
        self.fields
            .iter()
            .filter_map(|(name, field)| field.error().map(|error| (name.clone(), error)))
            .collect()
    }

    /// Snapshot of every field's value, error and touched flag.
    pub fn states(&self) -> IndexMap<String, FieldState<F::Value, F::Error>> {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.state()))
            .collect()
    }

    /// Whether no field currently holds an error.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|field| field.error().is_none())
    }

    /// Touch every field, then call `submitter` with the current values if
    /// every field is valid.
    ///
    /// Relies on the error channels being current; no extra validation pass
    /// runs here. Returns whether `submitter` was called.
    pub fn submit<S>(&self, submitter: S) -> bool
    where
        S: FnOnce(FormValues<F::Value>),
    {
        for field in self.fields.values() {
            field.touch();
        }

        let blocked: Vec<&str> = self
            .fields
            .iter()
            .filter(|(_, field)| field.error().is_some())
            .map(|(name, _)| name.as_str())
            .collect();
        if !blocked.is_empty() {
            tracing::debug!(?blocked, "submission blocked by validation errors");
            return false;
        }

        tracing::debug!(fields = self.fields.len(), "submitting form");
        submitter(self.values());
        true
    }
}

impl<F: Field> Index<&str> for Form<F> {
    type Output = F;

    /// Panics if the form has no field called `name`.
    fn index(&self, name: &str) -> &F {
        self.field(name)
            .unwrap_or_else(|| panic!("form has no field named `{name}`"))
    }
}

impl<F: Field> Drop for Form<F> {
    fn drop(&mut self) {
        for subscription in self.wiring.drain(..) {
            subscription.dispose();
        }
    }
}

impl<F: Field> fmt::Debug for Form<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("valid", &self.is_valid())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{atomic, create_field, AtomicField, FieldSchema};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Text = AtomicField<String>;

    fn text() -> FieldSchema<Text> {
        create_field(atomic::<String, String>)
    }

    fn required() -> FieldSchema<Text> {
        text().with_validator(|value: &String| {
            value.is_empty().then(|| "This field is required".to_string())
        })
    }

    fn recording_validator(
        calls: Arc<Mutex<Vec<String>>>,
        error: Option<&'static str>,
    ) -> FieldSchema<Text> {
        text().with_validator(move |value: &String| {
            calls.lock().push(value.clone());
            error.map(str::to_string)
        })
    }

    #[test]
    fn form_creation() {
        let schema = describe_form([("name", text())]).unwrap();
        let form = create_form(&schema, [("name", String::new())]).unwrap();

        assert_eq!(form["name"].value(), "");
        assert!(!form["name"].is_touched());
        assert_eq!(form.values(), IndexMap::from([("name".to_string(), String::new())]));
    }

    #[test]
    fn changing_field_value() {
        let schema = describe_form([("name", text())]).unwrap();
        let form = create_form(&schema, [("name", String::new())]).unwrap();

        form["name"].set_value("John Doe".to_string());

        assert_eq!(form["name"].value(), "John Doe");
        assert!(!form["name"].is_touched());
        assert_eq!(form.values()["name"], "John Doe");
    }

    #[test]
    fn validates_once_on_creation() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let schema =
            describe_form([("name", recording_validator(calls.clone(), Some("Field error")))])
                .unwrap();

        let form = create_form(&schema, [("name", String::new())]).unwrap();

        assert_eq!(*calls.lock(), vec![String::new()]);
        assert_eq!(form["name"].error().as_deref(), Some("Field error"));
    }

    #[test]
    fn revalidates_on_change() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let schema =
            describe_form([("name", recording_validator(calls.clone(), Some("Field error")))])
                .unwrap();
        let form = create_form(&schema, [("name", String::new())]).unwrap();

        form["name"].set_value("John".to_string());

        assert_eq!(*calls.lock(), vec![String::new(), "John".to_string()]);
        assert_eq!(form["name"].error().as_deref(), Some("Field error"));
    }

    #[test]
    fn revalidation_does_not_cascade() {
        let first_calls = Arc::new(Mutex::new(Vec::new()));
        let second_calls = Arc::new(Mutex::new(Vec::new()));
        let schema = describe_form([
            ("first", recording_validator(first_calls.clone(), None)),
            ("second", recording_validator(second_calls.clone(), None)),
        ])
        .unwrap();
        let form = create_form(
            &schema,
            [("first", "a".to_string()), ("second", "b".to_string())],
        )
        .unwrap();

        form["first"].set_value("changed".to_string());

        assert_eq!(first_calls.lock().len(), 2);
        assert_eq!(second_calls.lock().len(), 1);
    }

    #[test]
    fn error_subscribers_see_revalidation() {
        let schema = describe_form([("name", required())]).unwrap();
        let form = create_form(&schema, [("name", String::new())]).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        form["name"].on_error_change(move |error| seen_clone.lock().push(error.cloned()));

        form["name"].set_value("John".to_string());

        assert_eq!(*seen.lock(), vec![None]);
        assert_eq!(form["name"].error(), None);
    }

    #[test]
    fn submit_passes_values_when_valid() {
        let schema = describe_form([("name", text())]).unwrap();
        let form = create_form(&schema, [("name", String::new())]).unwrap();
        let submitted = Arc::new(Mutex::new(Vec::new()));

        let submitted_clone = submitted.clone();
        let accepted = form.submit(move |values| submitted_clone.lock().push(values));

        assert!(accepted);
        assert!(form["name"].is_touched());
        assert_eq!(
            *submitted.lock(),
            vec![IndexMap::from([("name".to_string(), String::new())])]
        );
    }

    #[test]
    fn submit_blocked_by_any_error() {
        let schema = describe_form([
            ("ok", text()),
            ("broken", text().with_validator(|_: &String| Some("an error".to_string()))),
        ])
        .unwrap();
        let form = create_form(&schema, [("ok", "x".to_string()), ("broken", "y".to_string())])
            .unwrap();
        let calls = AtomicUsize::new(0);

        let accepted = form.submit(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!accepted);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(form["ok"].is_touched());
        assert!(form["broken"].is_touched());
        assert_eq!(
            form.errors(),
            IndexMap::from([("broken".to_string(), "an error".to_string())])
        );
    }

    #[test]
    fn submit_touches_already_touched_fields() {
        let schema = describe_form([("name", text())]).unwrap();
        let form = create_form(&schema, [("name", String::new())]).unwrap();
        form["name"].touch();
        let touches = Arc::new(AtomicUsize::new(0));
        let touches_clone = touches.clone();
        form["name"].on_touched_change(move |touched| {
            assert!(touched);
            touches_clone.fetch_add(1, Ordering::SeqCst);
        });

        form.submit(|_| {});

        assert_eq!(touches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_initial_value_fails() {
        let schema = describe_form([("name", text()), ("email", text())]).unwrap();

        let result = create_form(&schema, [("name", String::new())]);

        assert_eq!(
            result.unwrap_err(),
            FormError::MissingInitialValue("email".to_string())
        );
    }

    #[test]
    fn unknown_initial_value_fails() {
        let schema = describe_form([("name", text())]).unwrap();

        let result = create_form(
            &schema,
            [("name", String::new()), ("nickname", String::new())],
        );

        assert_eq!(
            result.unwrap_err(),
            FormError::UnknownField("nickname".to_string())
        );
    }

    #[test]
    fn duplicate_initial_value_fails() {
        let schema = describe_form([("name", text())]).unwrap();

        let result = create_form(&schema, [("name", "a".to_string()), ("name", "b".to_string())]);

        assert_eq!(
            result.unwrap_err(),
            FormError::DuplicateInitialValue("name".to_string())
        );
    }

    #[test]
    fn dropping_form_detaches_validation() {
        let schema = describe_form([("name", required())]).unwrap();
        let form = create_form(&schema, [("name", String::new())]).unwrap();
        let handle = Arc::clone(&form.fields()["name"]);

        drop(form);
        handle.set_value("now valid".to_string());

        assert!(handle.error().is_some());
    }
}
