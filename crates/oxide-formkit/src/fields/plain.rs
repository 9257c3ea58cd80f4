//! Static text placed among the fields.

use crate::bag::{AttributeBag, ErrorBag};
use crate::element::Element;
use crate::fields::open_tag;

/// Text wrapped in a tag, `<p>` unless configured. The text is emitted as
/// given, so it may carry markup.
#[derive(Debug, Clone)]
pub struct PlainText {
    text: String,
    tag: String,
    attributes: AttributeBag,
}

impl PlainText {
    /// Creates a paragraph.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: "p".to_string(),
            attributes: AttributeBag::new(),
        }
    }

    /// Builder method to set the wrapping tag.
    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    /// Builder method to set an identifier.
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

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }
}

impl Element for PlainText {
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
        format!(
            "{}{}</{}>",
            open_tag(&self.tag, &self.attributes.render()),
            self.text,
            self.tag
        )
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
