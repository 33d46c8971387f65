//! Field schemas: how to build a field and how to validate it.
//!
//! A [`FieldSchema`] carries no runtime state. It is a recipe that a form
//! runs once per form instance, so the same schema can back any number of
//! forms.

use std::fmt;
use std::sync::Arc;

use super::{DynField, Field};

/// Shared validator: maps a value to an error, or `None` when it passes.
pub type Validator<V, E> = Arc<dyn Fn(&V) -> Option<E> + Send + Sync>;

type Factory<F> = Arc<dyn Fn(<F as Field>::Value) -> F + Send + Sync>;

/// Per-field options.
pub struct FieldOptions<V, E> {
    validate: Validator<V, E>,
}

impl<V, E> FieldOptions<V, E> {
    pub fn new<C>(validate: C) -> Self
    where
        C: Fn(&V) -> Option<E> + Send + Sync + 'static,
    {
        Self {
            validate: Arc::new(validate),
        }
    }

    /// Run the validator.
    pub fn validate(&self, value: &V) -> Option<E> {
        (self.validate)(value)
    }

    /// A shared handle to the validator.
    pub fn validator(&self) -> Validator<V, E> {
        Arc::clone(&self.validate)
    }
}

/// Every value passes.
impl<V, E> Default for FieldOptions<V, E> {
    fn default() -> Self {
        Self {
            validate: Arc::new(|_: &V| None),
        }
    }
}

impl<V, E> Clone for FieldOptions<V, E> {
    fn clone(&self) -> Self {
        Self {
            validate: Arc::clone(&self.validate),
        }
    }
}

impl<V, E> fmt::Debug for FieldOptions<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldOptions").finish_non_exhaustive()
    }
}

/// Description of a single field: a factory plus its options.
pub struct FieldSchema<F: Field> {
    factory: Factory<F>,
    options: FieldOptions<F::Value, F::Error>,
}

impl<F: Field> FieldSchema<F> {
    /// Replace the validator.
    pub fn with_validator<C>(mut self, validate: C) -> Self
    where
        C: Fn(&F::Value) -> Option<F::Error> + Send + Sync + 'static,
    {
        self.options = FieldOptions::new(validate);
        self
    }

    pub fn options(&self) -> &FieldOptions<F::Value, F::Error> {
        &self.options
    }

    /// Construct a live field holding `initial`.
    ///
    /// Does not validate; that is the form's job.
    pub fn build(&self, initial: F::Value) -> F {
        (self.factory)(initial)
    }

    /// Run this field's validator against `value`.
    pub fn validate(&self, value: &F::Value) -> Option<F::Error> {
        self.options.validate(value)
    }

    /// Erase the field type so schemas for different field variants can sit
    /// in the same form.
    pub fn into_dyn(self) -> FieldSchema<DynField<F::Value, F::Error>> {
        let factory = self.factory;
        FieldSchema {
            factory: Arc::new(move |initial: F::Value| -> DynField<F::Value, F::Error> {
                Arc::new(factory(initial))
            }),
            options: self.options,
        }
    }
}

impl<F: Field> Clone for FieldSchema<F> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            options: self.options.clone(),
        }
    }
}

impl<F: Field> fmt::Debug for FieldSchema<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("field", &std::any::type_name::<F>())
            .finish_non_exhaustive()
    }
}

/// Describe a field with the default validator (everything passes).
///
/// ```rust
/// use typed_forms_core::field::{atomic, create_field};
///
/// let name = create_field(atomic::<String, String>)
///     .with_validator(|value: &String| value.is_empty().then(|| "required".to_string()));
/// ```
pub fn create_field<V, E, F, Fac>(factory: Fac) -> FieldSchema<F>
where
    F: Field<Value = V, Error = E>,
    Fac: Fn(V) -> F + Send + Sync + 'static,
{
    create_field_with(factory, FieldOptions::default())
}

/// Describe a field with explicit options.
pub fn create_field_with<V, E, F, Fac>(factory: Fac, options: FieldOptions<V, E>) -> FieldSchema<F>
where
    F: Field<Value = V, Error = E>,
    Fac: Fn(V) -> F + Send + Sync + 'static,
{
    FieldSchema {
        factory: Arc::new(factory),
        options,
    }
}
