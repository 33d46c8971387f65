use thiserror::Error;

/// Contract violations detected while describing or constructing a form.
///
/// These are programming errors in how the form was put together. Failed
/// validation is never reported through this type; it lives in each
/// field's error channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),

    #[error("no initial value supplied for field `{0}`")]
    MissingInitialValue(String),

    #[error("initial value for `{0}` does not match any declared field")]
    UnknownField(String),

    #[error("initial value for `{0}` is supplied more than once")]
    DuplicateInitialValue(String),
}

pub type Result<T, E = FormError> = std::result::Result<T, E>;
