//! Element and field traits shared by everything a fieldset can hold.

use std::any::Any;

use tracing::debug;

use crate::bag::{AttrValue, AttributeBag, ErrorBag};
use crate::condition::Condition;
use crate::error::Result;
use crate::validation::Validator;

/// Anything that can be placed in a [`Fieldset`](crate::Fieldset).
pub trait Element: Any {
    /// Returns the element identifier, if it has one.
    fn identify(&self) -> Option<&str>;

    /// Returns false for elements rendered outside the visible group,
    /// such as hidden inputs.
    fn is_visible(&self) -> bool {
        true
    }

    /// Returns true if no condition failed.
    fn is_valid(&self) -> bool;

    /// Returns the collected validation messages.
    fn errors(&self) -> ErrorBag;

    /// Renders the element as HTML.
    fn render(&self) -> String;

    /// Returns the element as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the element as mutable `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the element as a field, if it is one.
    fn as_field(&self) -> Option<&dyn Field> {
        None
    }

    /// Returns the element as a mutable field, if it is one.
    fn as_field_mut(&mut self) -> Option<&mut dyn Field> {
        None
    }
}

/// State every field owns: its attributes, its messages and its label.
///
/// `id`, `name` and `required` live in the attribute bag so they render in
/// the fixed attribute order.
#[derive(Debug, Clone, Default)]
pub struct FieldCore {
    attributes: AttributeBag,
    errors: ErrorBag,
    label: Option<String>,
    hidden: bool,
}

impl FieldCore {
    /// Creates the core of a field called `name`. The label defaults to the
    /// name and the identifier to the stripped name.
    pub fn new(name: &str) -> Self {
        let mut core = Self::default();
        core.attributes.put("name", name);
        core.attributes.put("id", name);
        core.label = Some(name.to_string());
        core
    }

    /// Creates the core of a field rendered outside the visible group.
    pub fn hidden(name: &str) -> Self {
        Self {
            hidden: true,
            ..Self::new(name)
        }
    }

    /// Returns the identifier.
    pub fn identify(&self) -> Option<&str> {
        self.attributes.get_str("id").filter(|id| !id.is_empty())
    }

    /// Returns true if the field renders outside the visible group.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }
}

/// A form control with a name, a value and validation state.
///
/// Implementors provide storage and markup; naming, labelling, conditions
/// and the label/error parts of the markup are shared.
pub trait Field: Element {
    /// Returns the shared field state.
    fn core(&self) -> &FieldCore;

    /// Returns the shared field state for modification.
    fn core_mut(&mut self) -> &mut FieldCore;

    /// Returns true if the field holds a non-empty value.
    fn has_value(&self) -> bool;

    /// Returns the values conditions are evaluated against.
    fn condition_values(&self) -> Vec<String>;

    /// Renders the control itself, without label or errors.
    fn render_field(&self) -> String;

    /// Returns the field name.
    fn name(&self) -> &str {
        self.core().attributes.get_str("name").unwrap_or_default()
    }

    /// Sets the field name.
    fn set_name(&mut self, name: &str) {
        self.core_mut().attributes.put("name", name);
    }

    /// Returns the label.
    fn label(&self) -> Option<&str> {
        self.core().label.as_deref().filter(|l| !l.is_empty())
    }

    /// Sets the label. An empty label renders nothing.
    fn set_label(&mut self, label: &str) {
        self.core_mut().label = Some(label.to_string());
    }

    /// Returns true if the field is required.
    fn is_required(&self) -> bool {
        self.core()
            .attributes
            .get("required")
            .and_then(AttrValue::as_flag)
            .unwrap_or(false)
    }

    /// Marks the field as required or optional.
    fn set_required(&mut self, required: bool) {
        self.core_mut().attributes.put("required", required);
    }

    /// Sets an explicit identifier, stripped to `[a-z0-9_-]`.
    fn set_identifier(&mut self, identifier: &str) {
        self.core_mut().attributes.put("id", identifier);
    }

    /// Builder method to set the label.
    #[must_use]
    fn with_label(mut self, label: &str) -> Self
    where
        Self: Sized,
    {
        self.set_label(label);
        self
    }

    /// Builder method to mark the field as required.
    #[must_use]
    fn with_required(mut self, required: bool) -> Self
    where
        Self: Sized,
    {
        self.set_required(required);
        self
    }

    /// Builder method to set an explicit identifier.
    #[must_use]
    fn with_identifier(mut self, identifier: &str) -> Self
    where
        Self: Sized,
    {
        self.set_identifier(identifier);
        self
    }

    /// Builder method to set an application attribute.
    fn with_attribute(mut self, name: &str, value: impl Into<AttrValue>) -> Result<Self>
    where
        Self: Sized,
    {
        self.attributes_mut().set(name, value)?;
        Ok(self)
    }

    /// Builder method to add a class.
    #[must_use]
    fn with_class(mut self, class: &str) -> Self
    where
        Self: Sized,
    {
        self.core_mut().attributes.push_value("class", class);
        self
    }

    /// Returns the attribute bag.
    fn attributes(&self) -> &AttributeBag {
        &self.core().attributes
    }

    /// Returns the attribute bag for modification.
    fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.core_mut().attributes
    }

    /// Returns the error bag.
    fn error_bag(&self) -> &ErrorBag {
        &self.core().errors
    }

    /// Returns the error bag for modification.
    fn error_bag_mut(&mut self) -> &mut ErrorBag {
        &mut self.core_mut().errors
    }

    /// Evaluates a condition, recording `message` if it fails.
    ///
    /// Optional fields without a value are not checked.
    fn condition(&mut self, condition: &Condition, message: &str) -> Result<bool> {
        self.condition_with(condition, message, false)
    }

    /// Evaluates a condition; with `force` empty optional fields are
    /// checked too.
    fn condition_with(&mut self, condition: &Condition, message: &str, force: bool) -> Result<bool> {
        if !force && !self.is_required() && !self.has_value() {
            debug!(field = %self.name(), "skipping condition on empty optional field");
            return Ok(true);
        }

        let passed = condition.evaluate(self.name(), &self.condition_values())?;
        if !passed {
            debug!(field = %self.name(), error = message, "condition failed");
            let core = self.core_mut();
            core.errors.add(message);
            core.attributes.push_value("class", "error");
        }
        Ok(passed)
    }

    /// Runs a stock validator as a condition, using its own message.
    fn validate(&mut self, validator: &dyn Validator) -> Result<bool> {
        let values = self.condition_values();
        let message = if values.is_empty() {
            validator.validate("").err()
        } else {
            values.iter().find_map(|v| validator.validate(v).err())
        };
        let outcome = Condition::Literal(message.is_none());
        let message = message.unwrap_or_else(|| validator.message().to_string());
        self.condition(&outcome, &message)
    }

    /// Renders `<label for="id">` with a `<sup>*</sup>` marker on required
    /// fields, or nothing when there is no label.
    fn render_label(&self) -> String {
        if self.core().hidden {
            return String::new();
        }
        let Some(label) = self.label() else {
            return String::new();
        };
        format!(
            r#"<label for="{}">{label}{}</label>"#,
            self.core().identify().unwrap_or_default(),
            required_marker(self.is_required())
        )
    }

    /// Renders the collected messages.
    fn render_error(&self) -> String {
        self.error_bag().render()
    }
}

pub(crate) fn required_marker(required: bool) -> &'static str {
    if required {
        "<sup>*</sup>"
    } else {
        ""
    }
}

/// Values a scalar field checks conditions against.
pub(crate) fn scalar_values(value: &str) -> Vec<String> {
    if value.is_empty() {
        Vec::new()
    } else {
        vec![value.to_string()]
    }
}

/// Implements [`Element`] for a [`Field`], rendering the listed parts in
/// order (`label`, `field`, `error`).
macro_rules! impl_element {
    (@part $field:ident, label) => {
        $crate::element::Field::render_label($field)
    };
    (@part $field:ident, field) => {
        $crate::element::Field::render_field($field)
    };
    (@part $field:ident, error) => {
        $crate::element::Field::render_error($field)
    };
    ($ty:ty) => {
        $crate::element::impl_element!($ty: label, field, error);
    };
    ($ty:ty: $($part:ident),+) => {
        impl $crate::element::Element for $ty {
            fn identify(&self) -> Option<&str> {
                $crate::element::Field::core(self).identify()
            }

            fn is_visible(&self) -> bool {
                !$crate::element::Field::core(self).is_hidden()
            }

            fn is_valid(&self) -> bool {
                $crate::element::Field::error_bag(self).is_empty()
            }

            fn errors(&self) -> $crate::bag::ErrorBag {
                $crate::element::Field::error_bag(self).clone()
            }

            fn render(&self) -> String {
                let this = self;
                let mut out = String::new();
                $(out.push_str(&$crate::element::impl_element!(@part this, $part));)+
                out
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }

            fn as_field(&self) -> Option<&dyn $crate::element::Field> {
                Some(self)
            }

            fn as_field_mut(&mut self) -> Option<&mut dyn $crate::element::Field> {
                Some(self)
            }
        }
    };
}

pub(crate) use impl_element;
