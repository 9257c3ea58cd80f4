//! Multi-line text field.

use crate::element::{impl_element, scalar_values, Field, FieldCore};
use crate::escape::html_escape;

const DEFAULT_ROWS: u32 = 10;
const DEFAULT_COLS: u32 = 20;

/// A `<textarea>` field, 10 rows by 20 columns unless configured.
#[derive(Debug, Clone)]
pub struct Textarea {
    core: FieldCore,
    value: String,
}

impl Textarea {
    /// Creates a textarea.
    pub fn new(name: &str) -> Self {
        let mut core = FieldCore::new(name);
        core.attributes_mut().put("rows", DEFAULT_ROWS);
        core.attributes_mut().put("cols", DEFAULT_COLS);
        Self {
            core,
            value: String::new(),
        }
    }

    /// Builder method to set the value.
    #[must_use]
    pub fn with_value(mut self, value: impl ToString) -> Self {
        self.set_value(value);
        self
    }

    /// Returns the escaped value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets the value. The value is HTML-escaped.
    pub fn set_value(&mut self, value: impl ToString) {
        self.value = html_escape(&value.to_string());
    }

    /// Sets the number of visible rows.
    pub fn set_rows(&mut self, rows: u32) {
        self.core.attributes_mut().put("rows", rows);
    }

    /// Sets the number of visible columns.
    pub fn set_cols(&mut self, cols: u32) {
        self.core.attributes_mut().put("cols", cols);
    }
}

impl Field for Textarea {
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
            "<textarea {}>{}</textarea>",
            self.attributes().render(),
            self.value
        )
    }
}

impl_element!(Textarea);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::element::Element;

    #[test]
    fn test_render_field() {
        let field = Textarea::new("comment").with_value("hello").with_required(true);
        assert_eq!(
            field.render_field(),
            r#"<textarea id="comment" name="comment" required="required" rows="10" cols="20">hello</textarea>"#
        );
    }

    #[test]
    fn test_render() {
        let field = Textarea::new("name")
            .with_value("value")
            .with_identifier("id")
            .with_label("label")
            .with_required(true)
            .with_class("foo");
        assert_eq!(
            field.render(),
            r#"<label for="id">label<sup>*</sup></label><textarea id="id" name="name" required="required" rows="10" cols="20" class="foo">value</textarea>"#
        );
    }

    #[test]
    fn test_rows_and_cols() {
        let mut field = Textarea::new("bio");
        field.set_rows(3);
        field.set_cols(40);
        assert_eq!(
            field.render_field(),
            r#"<textarea id="bio" name="bio" rows="3" cols="40"></textarea>"#
        );
    }

    #[test]
    fn test_condition_on_value() {
        let mut field = Textarea::new("comment").with_value("abc");
        field.condition(&Condition::pattern("^[0-9]+$"), "Digits only").unwrap();
        assert_eq!(field.errors().all(), ["Digits only"]);
        assert_eq!(
            field.render_error(),
            r#"<ul class="error"><li>Digits only</li></ul>"#
        );
    }
}
