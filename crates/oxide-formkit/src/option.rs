//! Selectable choices for checkbox, radio and select fields.

use crate::bag::{AttributeBag, OptionBag};
use crate::escape::{html_escape, strip_strict};

/// A labelled value offered by a choice field.
///
/// Options nest: an option with sub-options renders as a nested list in
/// checkbox and radio groups and as an `<optgroup>` in selects.
#[derive(Debug, Clone, Default)]
pub struct FieldOption {
    label: String,
    value: String,
    attributes: AttributeBag,
    options: OptionBag,
}

impl FieldOption {
    /// Creates an option. The value is HTML-escaped.
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: html_escape(&value.to_string()),
            attributes: AttributeBag::new(),
            options: OptionBag::new(),
        }
    }

    /// Sets an explicit identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.set_identifier(identifier);
        self
    }

    /// Replaces the option attributes, keeping an explicit identifier.
    #[must_use]
    pub fn with_attributes(mut self, attributes: AttributeBag) -> Self {
        let id = self.id().map(str::to_string);
        self.attributes = attributes;
        if let Some(id) = id {
            self.attributes.put("id", id);
        }
        self
    }

    /// Sets the nested sub-options.
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = FieldOption>) -> Self {
        self.options.set(options);
        self
    }

    /// Returns the identifier: the explicit one, or a slug derived from the
    /// label (or the value when the label is empty).
    pub fn identify(&self) -> String {
        if let Some(id) = self.id() {
            return id.to_string();
        }
        let derived = strip_strict(&self.label);
        if derived.is_empty() {
            strip_strict(&self.value)
        } else {
            derived
        }
    }

    /// Returns the explicitly set identifier.
    pub fn id(&self) -> Option<&str> {
        self.attributes.get_str("id").filter(|id| !id.is_empty())
    }

    /// Sets an explicit identifier, overriding the derived one.
    pub fn set_identifier(&mut self, identifier: &str) {
        self.attributes.put("id", identifier);
    }

    /// Returns the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Sets the label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Returns the escaped value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets the value. The value is HTML-escaped.
    pub fn set_value(&mut self, value: impl ToString) {
        self.value = html_escape(&value.to_string());
    }

    /// Returns the option attributes.
    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    /// Returns the option attributes for modification.
    pub fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }

    /// Returns the nested sub-options.
    pub fn options(&self) -> &OptionBag {
        &self.options
    }

    /// Returns the nested sub-options for modification.
    pub fn options_mut(&mut self) -> &mut OptionBag {
        &mut self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_derived_from_label() {
        let option = FieldOption::new("Some Label", 1);
        assert_eq!(option.identify(), "some_label");
        assert_eq!(option.identify(), option.identify());
        assert_eq!(option.id(), None);
    }

    #[test]
    fn test_identify_falls_back_to_value() {
        let option = FieldOption::new("", "Value 2");
        assert_eq!(option.identify(), "value_2");
    }

    #[test]
    fn test_explicit_identifier_wins() {
        let mut option = FieldOption::new("Some Label", 1);
        option.set_identifier("Custom ID");
        assert_eq!(option.identify(), "custom_id");
        assert_eq!(option.id(), Some("custom_id"));
    }

    #[test]
    fn test_value_is_escaped() {
        let option = FieldOption::new("Quote", "\"q\" & <b>");
        assert_eq!(option.value(), "&quot;q&quot; &amp; &lt;b&gt;");
    }

    #[test]
    fn test_with_attributes_keeps_identifier() {
        let attributes = AttributeBag::new().with("title", "t").unwrap();
        let option = FieldOption::new("A", "a")
            .with_identifier("first")
            .with_attributes(attributes);
        assert_eq!(option.id(), Some("first"));
        assert_eq!(option.attributes().get_str("title"), Some("t"));
    }

    #[test]
    fn test_nested_options() {
        let option = FieldOption::new("Group", 1).with_options([
            FieldOption::new("Child 1", "1.1"),
            FieldOption::new("Child 2", "1.2"),
        ]);
        assert_eq!(option.options().count(), 2);
        assert_eq!(option.options().get("child_2").map(FieldOption::value), Some("1.2"));
    }
}
