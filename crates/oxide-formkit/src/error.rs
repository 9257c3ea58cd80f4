//! Error types for forms.

use thiserror::Error;

/// Form-specific errors.
///
/// These report structural misuse of the form tree. Failed validation
/// conditions are not errors: they are collected in each field's
/// [`ErrorBag`](crate::ErrorBag) and rendered inline.
#[derive(Debug, Error)]
pub enum FormError {
    /// Invalid or reserved attribute name, or a value of the wrong shape.
    #[error("invalid attribute {name}: {reason}")]
    Attribute { name: String, reason: String },

    /// A condition that cannot be evaluated against the field.
    #[error("invalid condition for field {field}: {reason}")]
    Condition { field: String, reason: String },

    /// No element registered under the identifier.
    #[error("field not found: {0}")]
    FieldNotFound(String),

    /// Element exists but is not of the requested type.
    #[error("element {id} is not a {expected}")]
    ElementType { id: String, expected: &'static str },

    /// Invalid field value.
    #[error("invalid value for field {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Submitted data parsing error.
    #[error("failed to parse form data: {0}")]
    ParseError(String),
}

impl FormError {
    pub(crate) fn attribute(name: &str, reason: impl Into<String>) -> Self {
        Self::Attribute {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_error_message() {
        let err = FormError::attribute("Foo", "must match ^[a-z][a-z0-9-:]*$");
        assert_eq!(
            err.to_string(),
            "invalid attribute Foo: must match ^[a-z][a-z0-9-:]*$"
        );
    }

    #[test]
    fn test_field_not_found_message() {
        let err = FormError::FieldNotFound("email".to_string());
        assert_eq!(err.to_string(), "field not found: email");
    }
}
