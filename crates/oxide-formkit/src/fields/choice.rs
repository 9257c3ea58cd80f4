//! Checkbox and radio groups.

use crate::bag::{AttrValue, AttributeBag, OptionBag};
use crate::element::{impl_element, required_marker, scalar_values, Field, FieldCore};
use crate::escape::html_escape;
use crate::fields::open_tag;
use crate::fieldset::Layout;
use crate::option::FieldOption;

const BLANK_LABEL: &str = "---";

/// Renders a list of checkable inputs, one per option.
struct ChoiceGroup<'a> {
    id: &'a str,
    input_type: &'static str,
    input_name: String,
    required: bool,
    layout: &'a Layout,
    is_checked: &'a dyn Fn(&str) -> bool,
}

impl ChoiceGroup<'_> {
    fn render(&self, attributes: &AttributeBag, options: &OptionBag) -> String {
        let group = &self.layout.group;
        let open = open_tag(
            group,
            &attributes.render_with(&[("name", None), ("required", None)]),
        );
        let body = if options.is_empty() {
            self.render_blank()
        } else {
            let mut counter = 0;
            self.render_options(options, &mut counter)
        };
        [open, body, format!("</{group}>")].join("\n")
    }

    fn render_blank(&self) -> String {
        let id = format!("{}_empty", self.id);
        let input = AttributeBag::new().render_with(&[
            ("type", Some(AttrValue::from(self.input_type))),
            ("id", Some(AttrValue::from(&id))),
            ("name", Some(AttrValue::from(&self.input_name))),
        ]);
        let element = &self.layout.element;
        format!(
            r#"<{element}><input {input} value=""/><label for="{id}" class="inline">{BLANK_LABEL}</label></{element}>"#
        )
    }

    fn render_options(&self, options: &OptionBag, counter: &mut usize) -> String {
        options
            .all()
            .map(|option| self.render_option(option, counter))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_option(&self, option: &FieldOption, counter: &mut usize) -> String {
        let id = match option.id() {
            Some(id) => id.to_string(),
            None => {
                let id = format!("{}_{counter}", self.id);
                *counter += 1;
                id
            }
        };

        let input = option.attributes().render_with(&[
            ("type", Some(AttrValue::from(self.input_type))),
            ("id", Some(AttrValue::from(&id))),
            ("name", Some(AttrValue::from(&self.input_name))),
            ("value", Some(AttrValue::from(option.value()))),
            ("checked", Some(AttrValue::Flag((self.is_checked)(option.value())))),
            ("required", Some(AttrValue::Flag(self.required))),
        ]);

        let sub = if option.options().is_empty() {
            String::new()
        } else {
            let group = &self.layout.group;
            format!(
                "<{group} class=\"options\">\n{}</{group}>",
                self.render_options(option.options(), counter)
            )
        };

        let element = &self.layout.element;
        format!(
            r#"<{element} class="options"><input {input}/><label for="{id}" class="inline">{}</label>{sub}</{element}>"#,
            option.label()
        )
    }
}

/// Group label: a `<span>`, omitted when the group holds exactly one option.
fn render_group_label(field: &dyn Field, options: &OptionBag) -> String {
    match field.label() {
        Some(label) if options.count() != 1 => format!(
            "<span>{label}{}</span>",
            required_marker(field.is_required())
        ),
        _ => String::new(),
    }
}

/// A group of checkboxes; any number of options can be checked.
///
/// Inputs are named `name[]` so the submitted values arrive as a list.
#[derive(Debug, Clone)]
pub struct Checkbox {
    core: FieldCore,
    values: Vec<String>,
    options: OptionBag,
    layout: Layout,
}

impl Checkbox {
    /// Creates an empty checkbox group.
    pub fn new(name: &str) -> Self {
        Self {
            core: FieldCore::new(name),
            values: Vec::new(),
            options: OptionBag::new(),
            layout: Layout::default(),
        }
    }

    /// Builder method to set the checked values.
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

    /// Builder method to set the wrapper tags.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns the escaped checked values.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Sets the checked values. Values are HTML-escaped.
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

impl Field for Checkbox {
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

    fn render_label(&self) -> String {
        render_group_label(self, &self.options)
    }

    fn render_field(&self) -> String {
        let is_checked = |value: &str| self.values.iter().any(|v| v == value);
        ChoiceGroup {
            id: self.core.identify().unwrap_or_default(),
            input_type: "checkbox",
            input_name: format!("{}[]", self.name()),
            required: self.is_required(),
            layout: &self.layout,
            is_checked: &is_checked,
        }
        .render(self.attributes(), &self.options)
    }
}

impl_element!(Checkbox: label, error, field);

/// A group of radio buttons; at most one option is checked.
#[derive(Debug, Clone)]
pub struct Radio {
    core: FieldCore,
    value: String,
    options: OptionBag,
    layout: Layout,
}

impl Radio {
    /// Creates an empty radio group.
    pub fn new(name: &str) -> Self {
        Self {
            core: FieldCore::new(name),
            value: String::new(),
            options: OptionBag::new(),
            layout: Layout::default(),
        }
    }

    /// Builder method to set the checked value.
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

    /// Builder method to set the wrapper tags.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns the escaped checked value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets the checked value. The value is HTML-escaped.
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

impl Field for Radio {
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

    fn render_label(&self) -> String {
        render_group_label(self, &self.options)
    }

    fn render_field(&self) -> String {
        let is_checked = |value: &str| !self.value.is_empty() && self.value == value;
        ChoiceGroup {
            id: self.core.identify().unwrap_or_default(),
            input_type: "radio",
            input_name: self.name().to_string(),
            required: self.is_required(),
            layout: &self.layout,
            is_checked: &is_checked,
        }
        .render(self.attributes(), &self.options)
    }
}

impl_element!(Radio: label, error, field);
