//! Validation message storage.

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::Li;

/// Ordered list of validation messages for one field.
///
/// Messages are appended while conditions run and only removed by an
/// explicit [`reset`](Self::reset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBag {
    messages: Vec<String>,
}

impl ErrorBag {
    /// Creates a new empty ErrorBag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message.
    pub fn add(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Appends a message; same as [`add`](Self::add).
    pub fn set(&mut self, message: impl Into<String>) {
        self.add(message);
    }

    /// Appends every message from the iterator.
    pub fn extend<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.messages.extend(messages.into_iter().map(Into::into));
    }

    /// Returns all messages in insertion order.
    pub fn all(&self) -> &[String] {
        &self.messages
    }

    /// Returns the number of messages.
    pub fn count(&self) -> usize {
        self.messages.len()
    }

    /// Returns whether any message was recorded.
    pub fn has(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Returns whether there are no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Removes all messages.
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    /// Renders messages as `<ul class="error">`, or nothing when empty.
    pub fn render(&self) -> String {
        if self.messages.is_empty() {
            return String::new();
        }

        html! { ul.class("error") }
            .children(self.messages.iter(), |msg, li: Element<Li>| li.text(msg))
            .render()
    }
}

impl std::fmt::Display for ErrorBag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
