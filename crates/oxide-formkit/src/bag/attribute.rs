//! HTML attribute storage and rendering.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{FormError, Result};
use crate::escape::{strip_loose, strip_strict};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9:-]*$").expect("NAME_RE: invalid regex pattern"));

/// Attributes owned by the field itself; applications cannot set them
/// through [`AttributeBag::set`] or [`AttributeBag::add`].
pub const RESERVED: [&str; 7] = [
    "id", "name", "value", "type", "checked", "selected", "required",
];

/// Attributes rendered first, in this order.
const RENDER_ORDER: [&str; 7] = [
    "type", "id", "name", "value", "checked", "selected", "required",
];

/// Value of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Scalar text value.
    Text(String),
    /// Multi-valued attribute such as `class`.
    List(Vec<String>),
    /// Boolean attribute; `true` renders as `name="name"`.
    Flag(bool),
}

impl AttrValue {
    /// Returns true if the value renders to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(values) => values.iter().all(String::is_empty),
            Self::Flag(flag) => !flag,
        }
    }

    /// Returns the text value, if scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the values, if multi-valued.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the flag, if boolean.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    fn render_value(&self, name: &str) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::List(values) => values
                .iter()
                .filter(|v| !v.is_empty())
                .cloned()
                .collect::<Vec<_>>()
                .join(" "),
            Self::Flag(_) => name.to_string(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Flag(_) => "flag",
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AttrValue {
    fn from(values: [&str; N]) -> Self {
        Self::List(values.iter().map(|v| (*v).to_string()).collect())
    }
}

/// Ordered mapping from attribute name to value.
///
/// Multi-valued attributes (only `class` by default) hold lists that are
/// unioned on [`add`](Self::add); every other attribute is a scalar that
/// [`set`](Self::set) and `add` overwrite. `id` is stripped to a strict
/// lower-case identifier and `name` is loosely cleaned whenever written.
#[derive(Debug, Clone)]
pub struct AttributeBag {
    storage: IndexMap<String, AttrValue>,
    multi_valued: Vec<String>,
}

impl Default for AttributeBag {
    fn default() -> Self {
        Self {
            storage: IndexMap::new(),
            multi_valued: vec!["class".to_string()],
        }
    }
}

impl AttributeBag {
    /// Creates an empty bag where only `class` is multi-valued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty bag with the given multi-valued attribute names.
    pub fn with_multi_valued<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            storage: IndexMap::new(),
            multi_valued: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Builder method to set an attribute.
    pub fn with(mut self, name: &str, value: impl Into<AttrValue>) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Builder method to add to an attribute.
    pub fn with_added(mut self, name: &str, value: impl Into<AttrValue>) -> Result<Self> {
        self.add(name, value)?;
        Ok(self)
    }

    /// Returns true if the attribute holds lists.
    pub fn is_multi_valued(&self, name: &str) -> bool {
        self.multi_valued.iter().any(|m| m == name)
    }

    /// Gets an attribute.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.storage.get(name)
    }

    /// Gets an attribute or the given default.
    pub fn get_or(&self, name: &str, default: impl Into<AttrValue>) -> AttrValue {
        self.storage
            .get(name)
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    /// Gets a scalar attribute as text.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.storage.get(name).and_then(AttrValue::as_str)
    }

    /// Returns true if the attribute is present and not empty.
    pub fn has(&self, name: &str) -> bool {
        self.storage.get(name).is_some_and(|v| !v.is_empty())
    }

    /// Sets an attribute, overwriting any previous value.
    pub fn set(&mut self, name: &str, value: impl Into<AttrValue>) -> Result<()> {
        assert_name(name)?;
        self.set_structural(name, value.into())
    }

    /// Adds a value to an attribute.
    ///
    /// Multi-valued attributes receive the union of old and new values,
    /// other attributes are overwritten.
    pub fn add(&mut self, name: &str, value: impl Into<AttrValue>) -> Result<()> {
        assert_name(name)?;
        let value = value.into();
        if !self.is_multi_valued(name) {
            return self.set_structural(name, value);
        }

        match value {
            AttrValue::Text(v) => self.push_value(name, &v),
            AttrValue::List(values) => {
                for v in values {
                    self.push_value(name, &v);
                }
            }
            AttrValue::Flag(_) => {
                return Err(FormError::attribute(name, "only list or text values can be added"));
            }
        }
        Ok(())
    }

    /// Removes a single value from a multi-valued attribute, or the whole
    /// attribute when no value is given.
    pub fn remove(&mut self, name: &str, value: Option<&str>) {
        let Some(value) = value else {
            self.storage.shift_remove(name);
            return;
        };

        if let Some(AttrValue::List(values)) = self.storage.get_mut(name) {
            values.retain(|v| v != value);
        }
    }

    /// Returns all non-empty attributes in insertion order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.storage
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of non-empty attributes.
    pub fn count(&self) -> usize {
        self.all().count()
    }

    /// Returns whether there are no non-empty attributes.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Removes all attributes.
    pub fn reset(&mut self) {
        self.storage.clear();
    }

    /// Renders attributes as an HTML attribute string.
    pub fn render(&self) -> String {
        self.render_with(&[])
    }

    /// Renders attributes merged with per-render overrides.
    ///
    /// An override of `None` hides the attribute. `type, id, name, value,
    /// checked, selected, required` come first, the rest keep insertion
    /// order. Empty values are skipped.
    pub fn render_with(&self, overrides: &[(&str, Option<AttrValue>)]) -> String {
        let mut merged: Vec<(&str, Option<&AttrValue>)> = self
            .storage
            .iter()
            .map(|(k, v)| (k.as_str(), Some(v)))
            .collect();

        for (name, value) in overrides {
            match merged.iter_mut().find(|(k, _)| *k == *name) {
                Some(entry) => entry.1 = value.as_ref(),
                None => merged.push((*name, value.as_ref())),
            }
        }

        merged.sort_by_key(|(name, _)| {
            RENDER_ORDER
                .iter()
                .position(|o| o == name)
                .unwrap_or(RENDER_ORDER.len())
        });

        merged
            .into_iter()
            .filter_map(|(name, value)| {
                value
                    .filter(|v| !v.is_empty())
                    .map(|v| format!(r#"{name}="{}""#, v.render_value(name)))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Writes an attribute without the reserved-name check. Fields use
    /// this for the structural attributes they own.
    pub(crate) fn set_structural(&mut self, name: &str, value: AttrValue) -> Result<()> {
        match (&value, self.is_multi_valued(name)) {
            (AttrValue::List(_), false) => {
                return Err(FormError::attribute(name, "only scalar values, got list"));
            }
            (AttrValue::Text(_) | AttrValue::Flag(_), true) => {
                return Err(FormError::attribute(
                    name,
                    format!("only list values, got {}", value.kind()),
                ));
            }
            _ => {}
        }

        let value = escape_value(name, value);
        self.storage.insert(name.to_string(), value);
        Ok(())
    }

    /// Writes a scalar structural attribute owned by a field or option.
    pub(crate) fn put(&mut self, name: &str, value: impl Into<AttrValue>) {
        let value = escape_value(name, value.into());
        self.storage.insert(name.to_string(), value);
    }

    /// Appends to a list attribute, skipping values already present.
    pub(crate) fn push_value(&mut self, name: &str, value: &str) {
        let value = escape_text(name, value);
        let entry = self
            .storage
            .entry(name.to_string())
            .or_insert_with(|| AttrValue::List(Vec::new()));
        match entry {
            AttrValue::List(values) => {
                if !values.contains(&value) {
                    values.push(value);
                }
            }
            other => *other = AttrValue::List(vec![value]),
        }
    }
}

fn assert_name(name: &str) -> Result<()> {
    if !NAME_RE.is_match(name) {
        return Err(FormError::attribute(name, "name must match ^[a-z][a-z0-9-:]*$"));
    }
    if RESERVED.contains(&name) {
        return Err(FormError::attribute(name, "name is reserved for the field"));
    }
    Ok(())
}

fn escape_text(name: &str, value: &str) -> String {
    match name {
        "id" => strip_strict(value),
        "name" => strip_loose(value),
        _ => value.to_string(),
    }
}

fn escape_value(name: &str, value: AttrValue) -> AttrValue {
    match value {
        AttrValue::Text(s) => AttrValue::Text(escape_text(name, &s)),
        AttrValue::List(values) => {
            AttrValue::List(values.iter().map(|v| escape_text(name, v)).collect())
        }
        flag @ AttrValue::Flag(_) => flag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut bag = AttributeBag::new();
        bag.set("placeholder", "Enter name").unwrap();
        bag.set("data-role", "search").unwrap();
        assert_eq!(bag.get_str("placeholder"), Some("Enter name"));
        assert_eq!(bag.get_str("data-role"), Some("search"));
        assert_eq!(bag.get_or("missing", "fallback"), AttrValue::from("fallback"));
    }

    #[test]
    fn test_set_overwrites_scalar() {
        let mut bag = AttributeBag::new();
        bag.set("title", "first").unwrap();
        bag.add("title", "second").unwrap();
        assert_eq!(bag.get_str("title"), Some("second"));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut bag = AttributeBag::new();
        for name in ["Foo", "1abc", "data_x", "", "-x", "on click"] {
            assert!(
                matches!(bag.set(name, "x"), Err(FormError::Attribute { .. })),
                "{name} should be rejected"
            );
        }
        assert!(bag.set("xml:lang", "en").is_ok());
    }

    #[test]
    fn test_reserved_names_rejected() {
        let mut bag = AttributeBag::new();
        for name in RESERVED {
            assert!(matches!(bag.set(name, "x"), Err(FormError::Attribute { .. })));
            assert!(matches!(bag.add(name, "x"), Err(FormError::Attribute { .. })));
        }
        assert!(bag.is_empty());
    }

    #[test]
    fn test_value_shape() {
        let mut bag = AttributeBag::new();
        assert!(bag.set("class", "foo").is_err());
        assert!(bag.set("title", vec!["a", "b"]).is_err());
        assert!(bag.set("class", vec!["foo"]).is_ok());
    }

    #[test]
    fn test_add_unions_multi_valued() {
        let mut bag = AttributeBag::new();
        bag.add("class", "foo").unwrap();
        bag.add("class", vec!["bar", "foo"]).unwrap();
        assert_eq!(
            bag.get("class"),
            Some(&AttrValue::List(vec!["foo".to_string(), "bar".to_string()]))
        );
    }

    #[test]
    fn test_remove_value_and_attribute() {
        let mut bag = AttributeBag::new()
            .with_added("class", ["foo", "bar"])
            .unwrap()
            .with("title", "t")
            .unwrap();

        bag.remove("class", Some("foo"));
        assert_eq!(bag.get("class").and_then(AttrValue::as_list), Some(&["bar".to_string()][..]));

        bag.remove("title", None);
        assert!(!bag.has("title"));

        bag.remove("class", Some("bar"));
        assert!(!bag.has("class"));
        assert_eq!(bag.count(), 0);
    }

    #[test]
    fn test_structural_escaping() {
        let mut bag = AttributeBag::new();
        bag.set_structural("id", "Do[ku] Żółw".into()).unwrap();
        bag.set_structural("name", "do[ku] x".into()).unwrap();
        assert_eq!(bag.get_str("id"), Some("do_ku_zolw"));
        assert_eq!(bag.get_str("name"), Some("do[ku]_x"));
    }

    #[test]
    fn test_render_order() {
        let mut bag = AttributeBag::new();
        bag.set("cols", "20").unwrap();
        bag.add("class", "foo").unwrap();
        bag.set_structural("required", true.into()).unwrap();
        bag.set_structural("name", "name".into()).unwrap();
        bag.set_structural("id", "id".into()).unwrap();

        assert_eq!(
            bag.render_with(&[("type", Some("text".into()))]),
            r#"type="text" id="id" name="name" required="required" cols="20" class="foo""#
        );
    }

    #[test]
    fn test_render_skips_empty_and_hidden() {
        let mut bag = AttributeBag::new();
        bag.set("title", "").unwrap();
        bag.set("disabled", false).unwrap();
        bag.set("placeholder", "p").unwrap();
        bag.set_structural("name", "n".into()).unwrap();

        assert_eq!(bag.render(), r#"name="n" placeholder="p""#);
        assert_eq!(bag.render_with(&[("name", None)]), r#"placeholder="p""#);
        assert_eq!(bag.count(), 2);
    }

    #[test]
    fn test_custom_multi_valued() {
        let mut bag = AttributeBag::with_multi_valued(["class", "rel"]);
        bag.add("rel", "nofollow").unwrap();
        bag.add("rel", "noopener").unwrap();
        assert_eq!(bag.render(), r#"rel="nofollow noopener""#);
    }
}
