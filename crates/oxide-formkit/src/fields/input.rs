//! Single-line `<input>` fields.

use crate::bag::AttrValue;
use crate::element::{impl_element, scalar_values, Field, FieldCore};
use crate::escape::html_escape;

/// The `type` of an [`Input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Password,
    Email,
    Url,
    Tel,
    Hidden,
}

impl InputKind {
    /// Returns the `type` attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Email => "email",
            Self::Url => "url",
            Self::Tel => "tel",
            Self::Hidden => "hidden",
        }
    }
}

/// A text-like input.
///
/// ```
/// use oxide_formkit::{Field, Input};
///
/// let field = Input::tel("name").with_value("value").with_required(true);
/// assert_eq!(
///     field.render_field(),
///     r#"<input type="tel" id="name" name="name" value="value" required="required"/>"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Input {
    core: FieldCore,
    kind: InputKind,
    value: String,
}

impl Input {
    /// Creates an input of the given kind.
    pub fn new(kind: InputKind, name: &str) -> Self {
        let core = if kind == InputKind::Hidden {
            FieldCore::hidden(name)
        } else {
            FieldCore::new(name)
        };
        Self {
            core,
            kind,
            value: String::new(),
        }
    }

    /// Creates a text input.
    pub fn text(name: &str) -> Self {
        Self::new(InputKind::Text, name)
    }

    /// Creates a password input.
    pub fn password(name: &str) -> Self {
        Self::new(InputKind::Password, name)
    }

    /// Creates an email input.
    pub fn email(name: &str) -> Self {
        Self::new(InputKind::Email, name)
    }

    /// Creates a url input.
    pub fn url(name: &str) -> Self {
        Self::new(InputKind::Url, name)
    }

    /// Creates a telephone input.
    pub fn tel(name: &str) -> Self {
        Self::new(InputKind::Tel, name)
    }

    /// Creates a hidden input, rendered outside the visible group.
    pub fn hidden(name: &str) -> Self {
        Self::new(InputKind::Hidden, name)
    }

    /// Builder method to set the value.
    #[must_use]
    pub fn with_value(mut self, value: impl ToString) -> Self {
        self.set_value(value);
        self
    }

    /// Returns the input kind.
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Returns the escaped value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets the value. The value is HTML-escaped.
    pub fn set_value(&mut self, value: impl ToString) {
        self.value = html_escape(&value.to_string());
    }
}

impl Field for Input {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn has_value(&self) -> bool {
        !self.value.is_empty()
    }

    fn condition_values(&self) -> Vec<String> {
        scalar_values(&self.value)
    }

    fn render_field(&self) -> String {
        format!(
            "<input {}/>",
            self.attributes().render_with(&[
                ("type", Some(AttrValue::from(self.kind.as_str()))),
                ("value", Some(AttrValue::from(&self.value))),
            ])
        )
    }
}

impl_element!(Input);
