//! Ordered groups of elements.

use std::any::{type_name, Any};

use indexmap::IndexMap;
use ironhtml::typed::Element as HtmlElement;
use ironhtml_elements::Legend;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::bag::{AttrValue, AttributeBag, ErrorBag};
use crate::element::{Element, Field};
use crate::error::{FormError, Result};
use crate::escape::html_escape;
use crate::fields::open_tag;

/// Wrapper tags of a group: the list tag and the tag around each entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub group: String,
    pub element: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new("ul", "li")
    }
}

impl Layout {
    pub fn new(group: &str, element: &str) -> Self {
        Self {
            group: group.to_string(),
            element: element.to_string(),
        }
    }
}

/// An ordered, keyed group of elements.
///
/// Hidden children render first, outside the group; every visible child
/// is wrapped in the layout's element tag. The fieldset owns its children,
/// so a tree of fieldsets can never contain a cycle.
pub struct Fieldset {
    label: Option<String>,
    attributes: AttributeBag,
    layout: Layout,
    storage: IndexMap<String, Box<dyn Element>>,
    next_index: usize,
}

impl std::fmt::Debug for Fieldset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fieldset")
            .field("label", &self.label)
            .field("attributes", &self.attributes)
            .field("layout", &self.layout)
            .field("children", &self.storage.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Default for Fieldset {
    fn default() -> Self {
        Self::new()
    }
}

impl Fieldset {
    /// Creates an empty fieldset without a legend.
    pub fn new() -> Self {
        Self {
            label: None,
            attributes: AttributeBag::new(),
            layout: Layout::default(),
            storage: IndexMap::new(),
            next_index: 0,
        }
    }

    /// Builder method to set the legend.
    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        self.set_label(label);
        self
    }

    /// Builder method to set the wrapper tags.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Builder method to set an identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.set_identifier(identifier);
        self
    }

    /// Builder method to add a class to the group tag.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.attributes.push_value("class", class);
        self
    }

    /// Builder method to add a child under its own identifier.
    #[must_use]
    pub fn with<E: Element>(mut self, element: E) -> Self {
        self.add(element);
        self
    }

    /// Stores `element` under `id`, replacing any element already there
    /// while keeping its position.
    pub fn set<E: Element>(&mut self, id: &str, element: E) {
        self.storage.insert(id.to_string(), Box::new(element));
    }

    /// Appends `element` and returns the key it was stored under: its
    /// identifier, or else the first free number from its position on.
    /// Numbers handed out once are not reused after a removal.
    pub fn add<E: Element>(&mut self, element: E) -> String {
        let key = match element.identify() {
            Some(id) => id.to_string(),
            None => self.next_free_index(),
        };
        self.storage.insert(key.clone(), Box::new(element));
        key
    }

    fn next_free_index(&mut self) -> String {
        let mut index = self.next_index.max(self.storage.len());
        while self.storage.contains_key(&index.to_string()) {
            index += 1;
        }
        self.next_index = index + 1;
        index.to_string()
    }

    /// Returns the element stored under `id`.
    pub fn get(&self, id: &str) -> Result<&dyn Element> {
        match self.storage.get(id) {
            Some(element) => Ok(element.as_ref()),
            None => Err(not_found(id)),
        }
    }

    /// Returns the element stored under `id` for modification.
    pub fn get_mut(&mut self, id: &str) -> Result<&mut dyn Element> {
        match self.storage.get_mut(id) {
            Some(element) => Ok(element.as_mut()),
            None => Err(not_found(id)),
        }
    }

    /// Returns the field stored under `id`.
    pub fn field(&self, id: &str) -> Result<&dyn Field> {
        self.get(id)?.as_field().ok_or_else(|| type_error(id, "field"))
    }

    /// Returns the field stored under `id` for modification, e.g. to run
    /// conditions on it.
    pub fn field_mut(&mut self, id: &str) -> Result<&mut dyn Field> {
        self.get_mut(id)?
            .as_field_mut()
            .ok_or_else(|| type_error(id, "field"))
    }

    /// Returns the element stored under `id` as a concrete type.
    pub fn get_as<T: Element>(&self, id: &str) -> Result<&T> {
        self.get(id)?
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| type_error(id, type_name::<T>()))
    }

    /// Returns the element stored under `id` as a concrete type for
    /// modification.
    pub fn get_as_mut<T: Element>(&mut self, id: &str) -> Result<&mut T> {
        self.get_mut(id)?
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| type_error(id, type_name::<T>()))
    }

    /// Removes and returns the element stored under `id`.
    pub fn remove(&mut self, id: &str) -> Result<Box<dyn Element>> {
        self.storage.shift_remove(id).ok_or_else(|| not_found(id))
    }

    /// Returns true if an element is stored under `id`.
    pub fn has(&self, id: &str) -> bool {
        self.storage.contains_key(id)
    }

    /// Iterates over keys and elements in insertion order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &dyn Element)> {
        self.storage.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn count(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Removes every child.
    pub fn reset(&mut self) {
        self.storage.clear();
        self.next_index = 0;
    }

    /// Sets the identifier, stripped to `[a-z0-9_-]`.
    pub fn set_identifier(&mut self, identifier: &str) {
        self.attributes.put("id", identifier);
    }

    /// Returns the legend.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }

    /// Sets the legend. An empty legend renders nothing.
    pub fn set_label(&mut self, label: &str) {
        self.label = Some(label.to_string());
    }

    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    /// Renders the markup escaped for embedding as a client-side
    /// template, without line breaks.
    pub fn prototype(&self) -> String {
        html_escape(&self.render()).replace(['\r', '\n'], "")
    }

    /// Renders the legend, the hidden children, then the group holding
    /// the visible ones. `suppressed` attributes are left off the group tag.
    pub(crate) fn render_nodes(&self, suppressed: &[&str]) -> Vec<String> {
        trace!(
            id = self.identify().unwrap_or_default(),
            children = self.storage.len(),
            "rendering fieldset"
        );

        let mut nodes = Vec::with_capacity(self.storage.len() + 3);
        if let Some(label) = self.label() {
            nodes.push(HtmlElement::<Legend>::new().raw(label).render());
        }

        let (hidden, visible): (Vec<_>, Vec<_>) =
            self.storage.values().partition(|e| !e.is_visible());
        nodes.extend(hidden.iter().map(|e| e.render()));

        let overrides: Vec<(&str, Option<AttrValue>)> =
            suppressed.iter().map(|name| (*name, None)).collect();
        let Layout { group, element } = &self.layout;
        nodes.push(open_tag(group, &self.attributes.render_with(&overrides)));
        nodes.extend(
            visible
                .iter()
                .map(|e| format!("<{element}>{}</{element}>", e.render())),
        );
        nodes.push(format!("</{group}>"));
        nodes
    }
}

fn not_found(id: &str) -> FormError {
    warn!(id = id, "element not found in fieldset");
    FormError::FieldNotFound(id.to_string())
}

fn type_error(id: &str, expected: &'static str) -> FormError {
    FormError::ElementType {
        id: id.to_string(),
        expected,
    }
}

impl Element for Fieldset {
    fn identify(&self) -> Option<&str> {
        self.attributes.get_str("id").filter(|id| !id.is_empty())
    }

    fn is_valid(&self) -> bool {
        self.storage.values().all(|e| e.is_valid())
    }

    /// Gathers the messages of direct field children. Nested fieldsets
    /// show their own messages through their fields.
    fn errors(&self) -> ErrorBag {
        let mut errors = ErrorBag::new();
        for field in self.storage.values().filter_map(|e| e.as_field()) {
            errors.extend(field.error_bag().all().iter().cloned());
        }
        errors
    }

    fn render(&self) -> String {
        self.render_nodes(&["id"]).concat()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
