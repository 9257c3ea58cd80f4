//! `<select>` fields.

use crate::bag::{AttrValue, OptionBag};
use crate::element::{impl_element, scalar_values, Field, FieldCore};
use crate::escape::html_escape;
use crate::fields::open_tag;
use crate::option::FieldOption;

fn render_select(
    id: &str,
    attributes: &str,
    options: &OptionBag,
    is_selected: &dyn Fn(&str) -> bool,
) -> String {
    let body = if options.is_empty() {
        format!(r#"<option id="{id}_empty" value="">---</option>"#)
    } else {
        let mut counter = 0;
        render_options(id, options, is_selected, &mut counter)
    };
    [open_tag("select", attributes), body, "</select>".to_string()].join("\n")
}

fn render_options(
    id: &str,
    options: &OptionBag,
    is_selected: &dyn Fn(&str) -> bool,
    counter: &mut usize,
) -> String {
    options
        .all()
        .map(|option| render_option(id, option, is_selected, counter))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Options with sub-options become an `<optgroup>` and take no number.
fn render_option(
    id: &str,
    option: &FieldOption,
    is_selected: &dyn Fn(&str) -> bool,
    counter: &mut usize,
) -> String {
    if !option.options().is_empty() {
        return format!(
            "<optgroup label=\"{}\">\n{}\n</optgroup>",
            option.label(),
            render_options(id, option.options(), is_selected, counter)
        );
    }

    let option_id = match option.id() {
        Some(explicit) => explicit.to_string(),
        None => {
            let derived = format!("{id}_{counter}");
            *counter += 1;
            derived
        }
    };

    let attributes = option.attributes().render_with(&[
        ("id", Some(AttrValue::from(option_id))),
        ("value", Some(AttrValue::from(option.value()))),
        ("selected", Some(AttrValue::Flag(is_selected(option.value())))),
    ]);
    format!("<option {attributes}>{}</option>", option.label())
}

/// A drop-down list with a single selected value.
#[derive(Debug, Clone)]
pub struct Select {
    core: FieldCore,
    value: String,
    options: OptionBag,
}

impl Select {
    /// Creates an empty select.
    pub fn new(name: &str) -> Self {
        Self {
            core: FieldCore::new(name),
            value: String::new(),
            options: OptionBag::new(),
        }
    }

    /// Builder method to set the selected value.
    #[must_use]
    pub fn with_value(mut self, value: impl ToString) -> Self {
        self.set_value(value);
        self
    }

    /// Builder method to set the options.
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = FieldOption>) -> Self {
        self.options.set(options);
        self
    }

    /// Returns the escaped selected value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets the selected value. The value is HTML-escaped.
    pub fn set_value(&mut self, value: impl ToString) {
        self.value = html_escape(&value.to_string());
    }

    /// Returns the options.
    pub fn options(&self) -> &OptionBag {
        &self.options
    }

    /// Returns the options for modification.
    pub fn options_mut(&mut self) -> &mut OptionBag {
        &mut self.options
    }
}

impl Field for Select {
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
        let is_selected = |value: &str| !self.value.is_empty() && self.value == value;
        render_select(
            self.core.identify().unwrap_or_default(),
            &self.attributes().render(),
            &self.options,
            &is_selected,
        )
    }
}

impl_element!(Select);

/// A list box where any number of values can be selected.
///
/// Named `name[]` so the submitted values arrive as a list.
#[derive(Debug, Clone)]
pub struct SelectMultiple {
    core: FieldCore,
    values: Vec<String>,
    options: OptionBag,
}

impl SelectMultiple {
    /// Creates an empty multi-select.
    pub fn new(name: &str) -> Self {
        Self {
            core: FieldCore::new(name),
            values: Vec::new(),
            options: OptionBag::new(),
        }
    }

    /// Builder method to set the selected values.
    #[must_use]
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.set_values(values);
        self
    }

    /// Builder method to set the options.
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = FieldOption>) -> Self {
        self.options.set(options);
        self
    }

    /// Returns the escaped selected values.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Sets the selected values. Values are HTML-escaped.
    pub fn set_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.values = values
            .into_iter()
            .map(|v| html_escape(&v.to_string()))
            .collect();
    }

    /// Returns the options.
    pub fn options(&self) -> &OptionBag {
        &self.options
    }

    /// Returns the options for modification.
    pub fn options_mut(&mut self) -> &mut OptionBag {
        &mut self.options
    }
}

impl Field for SelectMultiple {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn has_value(&self) -> bool {
        self.values.iter().any(|v| !v.is_empty())
    }

    fn condition_values(&self) -> Vec<String> {
        self.values.iter().filter(|v| !v.is_empty()).cloned().collect()
    }

    fn render_field(&self) -> String {
        let is_selected = |value: &str| self.values.iter().any(|v| v == value);
        let attributes = self.attributes().render_with(&[
            ("name", Some(AttrValue::from(format!("{}[]", self.name())))),
            ("multiple", Some(AttrValue::Flag(true))),
        ]);
        render_select(
            self.core.identify().unwrap_or_default(),
            &attributes,
            &self.options,
            &is_selected,
        )
    }
}

impl_element!(SelectMultiple);
