//! Buttons and links placed among the fields.

use crate::bag::{AttrValue, AttributeBag, ErrorBag};
use crate::element::Element;
use crate::escape::html_escape;
use crate::fields::open_tag;

/// What an [`Action`] renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// `<button>`.
    Button,
    /// `<button type="submit">`.
    Submit,
    /// `<a href>`.
    Anchor,
    /// `<a href>` styled as a cancel button.
    Cancel,
}

/// A button or link. Actions carry no value to validate: they are always
/// valid and render neither a label nor errors.
#[derive(Debug, Clone)]
pub struct Action {
    kind: ActionKind,
    attributes: AttributeBag,
    label: String,
}

impl Action {
    fn new(kind: ActionKind, name: &str) -> Self {
        let mut attributes = AttributeBag::new();
        attributes.put("name", name);
        attributes.put("id", name);
        Self {
            kind,
            attributes,
            label: name.to_string(),
        }
    }

    fn link(kind: ActionKind, label: &str, href: &str) -> Self {
        let mut action = Self::new(kind, label);
        action.attributes.put("href", html_escape(href));
        action
    }

    fn pressable(kind: ActionKind, name: &str, value: &str) -> Self {
        let mut action = Self::new(kind, name);
        action.set_value(value);
        action
    }

    /// Creates a `<button>` sending `name=value`.
    pub fn button(name: &str, value: &str) -> Self {
        Self::pressable(ActionKind::Button, name, value)
    }

    /// Creates a submit button sending `name=value`.
    pub fn submit(name: &str, value: &str) -> Self {
        Self::pressable(ActionKind::Submit, name, value)
    }

    /// Creates a link; the label doubles as the identifier source.
    pub fn anchor(label: &str, href: &str) -> Self {
        Self::link(ActionKind::Anchor, label, href)
    }

    /// Creates a link with the `button cancel` classes.
    pub fn cancel(label: &str, href: &str) -> Self {
        Self::link(ActionKind::Cancel, label, href)
    }

    /// Builder method to set the text shown on the action.
    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Builder method to set an explicit identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.attributes.put("id", identifier);
        self
    }

    /// Builder method to add a class.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.attributes.push_value("class", class);
        self
    }

    /// Returns what the action renders as.
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        self.attributes.get_str("name").unwrap_or_default()
    }

    /// Returns the text shown on the action.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Sets the text shown on the action.
    pub fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    /// Returns the submitted value of a button, or the target of a link.
    pub fn value(&self) -> &str {
        let key = if self.is_link() { "href" } else { "value" };
        self.attributes.get_str(key).unwrap_or_default()
    }

    /// Sets the submitted value of a button, or the target of a link.
    pub fn set_value(&mut self, value: &str) {
        let key = if self.is_link() { "href" } else { "value" };
        self.attributes.put(key, html_escape(value));
    }

    /// Returns the attribute bag.
    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    /// Returns the attribute bag for modification.
    pub fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }

    fn is_link(&self) -> bool {
        matches!(self.kind, ActionKind::Anchor | ActionKind::Cancel)
    }
}

impl Element for Action {
    fn identify(&self) -> Option<&str> {
        self.attributes.get_str("id").filter(|id| !id.is_empty())
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn errors(&self) -> ErrorBag {
        ErrorBag::new()
    }

    fn render(&self) -> String {
        let (tag, overrides) = match self.kind {
            ActionKind::Button => ("button", vec![]),
            ActionKind::Submit => ("button", vec![("type", Some(AttrValue::from("submit")))]),
            ActionKind::Anchor => ("a", vec![("name", None)]),
            ActionKind::Cancel => {
                let mut classes = self
                    .attributes
                    .get("class")
                    .and_then(AttrValue::as_list)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default();
                for class in ["button", "cancel"] {
                    if !classes.iter().any(|c| c == class) {
                        classes.push(class.to_string());
                    }
                }
                ("a", vec![("name", None), ("class", Some(AttrValue::List(classes)))])
            }
        };
        format!(
            "{}{}</{tag}>",
            open_tag(tag, &self.attributes.render_with(&overrides)),
            self.label
        )
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
