//! The form: a fieldset wrapped in a `<form>` tag.

use std::any::Any;
use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::bag::ErrorBag;
use crate::element::Element;
use crate::escape::html_escape;
use crate::fieldset::Fieldset;
use crate::fields::open_tag;

/// Default submission method.
pub const DEFAULT_METHOD: &str = "post";

/// Default encoding, required for file uploads.
pub const DEFAULT_ENCTYPE: &str = "multipart/form-data";

/// Attributes the form tag owns; the inner group leaves them off.
const FORM_ATTRIBUTES: [&str; 4] = ["id", "action", "method", "enctype"];

/// A form. Children are managed through the [`Fieldset`] it dereferences
/// to.
///
/// ```
/// use oxide_formkit::{Element, Field, Form, Input};
///
/// let mut form = Form::new("./");
/// form.add(Input::text("login").with_required(true));
///
/// let html = form.render();
/// assert!(html.starts_with(
///     r#"<form action="./" method="post" enctype="multipart/form-data">"#
/// ));
/// assert!(html.ends_with("</fieldset>\n</form>"));
/// ```
#[derive(Debug)]
pub struct Form {
    fieldset: Fieldset,
}

impl Form {
    /// Creates a form posting multipart data to `action`.
    pub fn new(action: &str) -> Self {
        let mut fieldset = Fieldset::new();
        let attributes = fieldset.attributes_mut();
        attributes.put("action", action);
        attributes.put("method", DEFAULT_METHOD);
        attributes.put("enctype", DEFAULT_ENCTYPE);
        Self { fieldset }
    }

    /// Builder method to set the method.
    #[must_use]
    pub fn with_method(mut self, method: &str) -> Self {
        self.set_method(method);
        self
    }

    /// Builder method to set the encoding.
    #[must_use]
    pub fn with_enctype(mut self, enctype: &str) -> Self {
        self.set_enctype(enctype);
        self
    }

    /// Builder method to set the legend.
    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        self.fieldset.set_label(label);
        self
    }

    /// Builder method to set an identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.fieldset.set_identifier(identifier);
        self
    }

    pub fn action(&self) -> &str {
        self.attribute("action")
    }

    pub fn set_action(&mut self, action: &str) {
        self.fieldset.attributes_mut().put("action", action);
    }

    pub fn method(&self) -> &str {
        self.attribute("method")
    }

    pub fn set_method(&mut self, method: &str) {
        self.fieldset.attributes_mut().put("method", method);
    }

    pub fn enctype(&self) -> &str {
        self.attribute("enctype")
    }

    pub fn set_enctype(&mut self, enctype: &str) {
        self.fieldset.attributes_mut().put("enctype", enctype);
    }

    /// Returns the fieldset holding the children.
    pub fn fieldset(&self) -> &Fieldset {
        &self.fieldset
    }

    /// Consumes the form, returning its fieldset.
    pub fn into_fieldset(self) -> Fieldset {
        self.fieldset
    }

    /// Renders the whole form escaped for embedding as a client-side
    /// template, without line breaks.
    pub fn prototype(&self) -> String {
        html_escape(&self.render()).replace(['\r', '\n'], "")
    }

    fn attribute(&self, name: &str) -> &str {
        self.fieldset
            .attributes()
            .get_str(name)
            .unwrap_or_default()
    }
}

impl Deref for Form {
    type Target = Fieldset;

    fn deref(&self) -> &Fieldset {
        &self.fieldset
    }
}

impl DerefMut for Form {
    fn deref_mut(&mut self) -> &mut Fieldset {
        &mut self.fieldset
    }
}

impl Element for Form {
    fn identify(&self) -> Option<&str> {
        self.fieldset.identify()
    }

    fn is_valid(&self) -> bool {
        self.fieldset.is_valid()
    }

    fn errors(&self) -> ErrorBag {
        self.fieldset.errors()
    }

    fn render(&self) -> String {
        trace!(action = self.action(), "rendering form");
        let mut nodes = vec![
            open_tag("form", &self.fieldset.attributes().render()),
            "<fieldset>".to_string(),
        ];
        nodes.extend(self.fieldset.render_nodes(&FORM_ATTRIBUTES));
        nodes.push("</fieldset>".to_string());
        nodes.push("</form>".to_string());
        nodes.join("\n")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::element::Field;
    use crate::fields::{Action, Input};

    #[test]
    fn test_defaults() {
        let form = Form::new("./");
        assert_eq!(form.action(), "./");
        assert_eq!(form.method(), "post");
        assert_eq!(form.enctype(), "multipart/form-data");
        assert!(form.is_empty());
    }

    #[test]
    fn test_render_empty() {
        let form = Form::new("./");
        assert_eq!(
            form.render(),
            concat!(
                r#"<form action="./" method="post" enctype="multipart/form-data">"#,
                "\n<fieldset>\n<ul>\n</ul>\n</fieldset>\n</form>"
            )
        );
    }

    #[test]
    fn test_render_children() {
        let mut form = Form::new("/save")
            .with_method("get")
            .with_identifier("edit")
            .with_label("Edit");
        form.attributes_mut().set("class", vec!["wide"]).unwrap();
        form.add(Input::hidden("token").with_value("t"));
        form.add(Action::submit("save", "1").with_label("Save"));

        assert_eq!(
            form.render(),
            [
                r#"<form id="edit" action="/save" method="get" enctype="multipart/form-data" class="wide">"#,
                "<fieldset>",
                "<legend>Edit</legend>",
                r#"<input type="hidden" id="token" name="token" value="t"/>"#,
                r#"<ul class="wide">"#,
                r#"<li><button type="submit" id="save" name="save" value="1">Save</button></li>"#,
                "</ul>",
                "</fieldset>",
                "</form>",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_children_through_fieldset() {
        let mut form = Form::new("./");
        form.add(Input::text("login").with_value("x"));
        form.field_mut("login")
            .unwrap()
            .condition(&Condition::pattern("^[0-9]+$"), "Digits only")
            .unwrap();
        assert!(!form.is_valid());
        assert_eq!(form.errors().all(), ["Digits only"]);
        assert!(form.fieldset().has("login"));
    }

    #[test]
    fn test_prototype_has_no_line_breaks() {
        let form = Form::new("./");
        let prototype = form.prototype();
        assert!(!prototype.contains('\n'));
        assert!(prototype.starts_with("&lt;form action=&quot;./&quot;"));
        assert!(prototype.ends_with("&lt;/fieldset&gt;&lt;/form&gt;"));
    }
}
