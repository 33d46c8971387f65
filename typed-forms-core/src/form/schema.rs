//! Form schemas: an ordered, immutable set of named field schemas.

use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;

use super::error::{FormError, Result};
use crate::field::{Field, FieldSchema};

/// Named field schemas, in declaration order.
///
/// Names are unique. Order only affects iteration (snapshots, submit), not
/// behavior.
pub struct FormSchema<F: Field> {
    fields: IndexMap<String, FieldSchema<F>>,
}

impl<F: Field> FormSchema<F> {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema<F>> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchema<F>)> {
        self.fields.iter().map(|(name, schema)| (name.as_str(), schema))
    }
}

impl<F: Field> Clone for FormSchema<F> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

impl<F: Field> fmt::Debug for FormSchema<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSchema")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Build a form schema from `(name, field schema)` pairs.
///
/// Fails with [`FormError::DuplicateField`] if a name appears twice.
///
/// ```rust
/// use typed_forms_core::field::{atomic, create_field};
/// use typed_forms_core::form::describe_form;
///
/// let schema = describe_form([
///     ("email", create_field(atomic::<String, String>)),
///     ("password", create_field(atomic::<String, String>)),
/// ])
/// .unwrap();
///
/// assert_eq!(schema.names().collect::<Vec<_>>(), ["email", "password"]);
/// ```
pub fn describe_form<F, I, K>(fields: I) -> Result<FormSchema<F>>
where
    F: Field,
    I: IntoIterator<Item = (K, FieldSchema<F>)>,
    K: Into<String>,
{
    let mut map = IndexMap::new();
    for (name, schema) in fields {
        match map.entry(name.into()) {
            Entry::Occupied(entry) => {
                return Err(FormError::DuplicateField(entry.key().clone()));
            }
            Entry::Vacant(entry) => {
                entry.insert(schema);
            }
        }
    }

    tracing::debug!(fields = map.len(), "form described");
    Ok(FormSchema { fields: map })
}
