//! Date entered through one `<select>` per unit.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::element::{impl_element, Field, FieldCore};
use crate::error::{FormError, Result};
use crate::fields::date::{coerce, default_input_formats, format_date, DateInput, DEFAULT_FORMAT};
use crate::fields::open_tag;

/// Years offered either side of the current year by default.
pub const DEFAULT_PERIOD: i32 = 25;

/// A unit of a [`SelectDate`], each rendered as its own picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl DateUnit {
    const ALL: [DateUnit; 6] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    /// Returns the key used in picker names, e.g. `birth[year]`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
    }

    /// Returns the unit a format letter belongs to.
    fn from_letter(letter: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.letters().contains(letter))
    }

    fn letters(self) -> &'static str {
        match self {
            Self::Year => "LoYy",
            Self::Month => "FMmnt",
            Self::Day => "dDjlNSwz",
            Self::Hour => "gGhH",
            Self::Minute => "i",
            Self::Second => "s",
        }
    }

    fn component(self, value: &NaiveDateTime) -> i32 {
        match self {
            Self::Year => value.year(),
            Self::Month => value.month() as i32,
            Self::Day => value.day() as i32,
            Self::Hour => value.hour() as i32,
            Self::Minute => value.minute() as i32,
            Self::Second => value.second() as i32,
        }
    }

    fn default_range(self, current_year: i32) -> PickerRange {
        match self {
            Self::Year => PickerRange::new(current_year - DEFAULT_PERIOD, current_year + DEFAULT_PERIOD),
            Self::Month => PickerRange::new(1, 12),
            Self::Day => PickerRange::new(1, 31),
            Self::Hour => PickerRange::new(0, 23),
            Self::Minute | Self::Second => PickerRange::new(0, 59),
        }
    }
}

/// Values offered by one picker: `from` to `to` inclusive, every `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerRange {
    pub from: i32,
    pub to: i32,
    #[serde(default = "default_step")]
    pub step: u32,
}

fn default_step() -> u32 {
    1
}

impl PickerRange {
    /// Creates a range with a step of one.
    pub fn new(from: i32, to: i32) -> Self {
        Self { from, to, step: 1 }
    }

    /// Builder method to set the step.
    #[must_use]
    pub fn with_step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    fn values(&self) -> impl Iterator<Item = i32> {
        (self.from..=self.to).step_by(self.step.max(1) as usize)
    }
}

/// A date split into per-unit pickers laid out by the format.
///
/// Each letter of the format becomes a list item holding the picker of its
/// unit (the first letter per unit) or the formatted component; other
/// characters become list items of their own, spaces are kept as is.
#[derive(Debug, Clone)]
pub struct SelectDate {
    core: FieldCore,
    value: Option<NaiveDateTime>,
    format: String,
    ranges: [PickerRange; 6],
}

impl SelectDate {
    /// Creates a date picker offering years within the default period
    /// around the current year.
    pub fn new(name: &str) -> Self {
        Self::with_period(name, DEFAULT_PERIOD)
    }

    /// Creates a date picker offering `period` years either side of the
    /// current year.
    pub fn with_period(name: &str, period: i32) -> Self {
        let year = Utc::now().year();
        let mut ranges = DateUnit::ALL.map(|unit| unit.default_range(year));
        ranges[0] = PickerRange::new(year.saturating_sub(period), year.saturating_add(period));
        Self {
            core: FieldCore::new(name),
            value: None,
            format: DEFAULT_FORMAT.to_string(),
            ranges,
        }
    }

    /// Builder method to set the value.
    pub fn with_value(mut self, input: impl Into<DateInput>) -> Result<Self> {
        self.set_value(input)?;
        Ok(self)
    }

    /// Builder method to set the layout format.
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    /// Builder method to set the values offered for a unit.
    #[must_use]
    pub fn with_range(mut self, unit: DateUnit, range: PickerRange) -> Self {
        self.set_range(unit, range);
        self
    }

    /// Returns the value.
    pub fn value(&self) -> Option<NaiveDateTime> {
        self.value
    }

    /// Sets the value from a timestamp, text or a parsed date.
    pub fn set_value(&mut self, input: impl Into<DateInput>) -> Result<()> {
        self.value = Some(coerce(self.name(), input.into(), &default_input_formats())?);
        Ok(())
    }

    /// Rebuilds the value from submitted picker values keyed by unit name
    /// (`year`, `month`, ...). Units not submitted keep their current
    /// component, or the start of the range when there is no value.
    pub fn set_parts<'a, I>(&mut self, parts: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut components = DateUnit::ALL.map(|unit| match &self.value {
            Some(value) => unit.component(value),
            None => match unit {
                DateUnit::Year => Utc::now().year(),
                DateUnit::Month | DateUnit::Day => 1,
                _ => 0,
            },
        });

        for (key, raw) in parts {
            let Some(position) = DateUnit::ALL.iter().position(|u| u.as_str() == key) else {
                continue;
            };
            components[position] = raw.trim().parse().map_err(|_| self.invalid(key, raw))?;
        }

        let [year, month, day, hour, minute, second] = components;
        let value = NaiveDate::from_ymd_opt(year, month as u32, day as u32)
            .and_then(|date| date.and_hms_opt(hour as u32, minute as u32, second as u32))
            .ok_or_else(|| {
                self.invalid("date", &format!("{year}-{month}-{day} {hour}:{minute}:{second}"))
            })?;
        self.value = Some(value);
        Ok(())
    }

    fn invalid(&self, key: &str, raw: &str) -> FormError {
        FormError::InvalidValue {
            field: self.name().to_string(),
            message: format!("invalid {key} {raw:?}"),
        }
    }

    /// Returns the layout format.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns the values offered for a unit.
    pub fn range(&self, unit: DateUnit) -> PickerRange {
        self.ranges[unit as usize]
    }

    /// Sets the values offered for a unit.
    pub fn set_range(&mut self, unit: DateUnit, range: PickerRange) {
        self.ranges[unit as usize] = range;
    }

    fn render_picker(&self, unit: DateUnit, selected: i32) -> String {
        let unit_name = unit.as_str();
        let options: String = self
            .range(unit)
            .values()
            .map(|v| {
                let selected = if v == selected { r#" selected="selected""# } else { "" };
                format!(r#"<option value="{v}"{selected}>{v:02}</option>"#)
            })
            .collect();
        format!(
            r#"<select name="{}[{unit_name}]" class="date {unit_name} small">{options}</select>"#,
            self.name()
        )
    }
}

impl Field for SelectDate {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn has_value(&self) -> bool {
        self.value.is_some()
    }

    fn condition_values(&self) -> Vec<String> {
        self.value
            .as_ref()
            .map(|v| format_date(v, &self.format))
            .into_iter()
            .collect()
    }

    fn render_field(&self) -> String {
        let value = self.value.unwrap_or_else(|| Utc::now().naive_utc());
        let mut rendered = Vec::new();
        let mut body = String::new();
        for ch in self.format.chars() {
            if ch == ' ' {
                body.push(ch);
                continue;
            }
            let item = match DateUnit::from_letter(ch) {
                Some(unit) if !rendered.contains(&unit) => {
                    rendered.push(unit);
                    self.render_picker(unit, unit.component(&value))
                }
                _ if ch.is_ascii_alphabetic() => format_date(&value, &ch.to_string()),
                _ => ch.to_string(),
            };
            body.push_str(&format!("<li>{item}</li>"));
        }

        let attributes = self
            .attributes()
            .render_with(&[("name", None), ("required", None)]);
        format!("{}{body}</ul>", open_tag("ul", &attributes))
    }
}

impl_element!(SelectDate);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::element::Element;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2014, 5, 6)
            .and_then(|d| d.and_hms_opt(12, 57, 33))
            .unwrap()
    }

    #[test]
    fn test_picker_markup() {
        let field = SelectDate::new("birth")
            .with_value(sample())
            .unwrap()
            .with_format("d")
            .with_range(DateUnit::Day, PickerRange::new(5, 7));
        assert_eq!(
            field.render_field(),
            concat!(
                r#"<ul id="birth"><li><select name="birth[day]" class="date day small">"#,
                r#"<option value="5">05</option><option value="6" selected="selected">06</option><option value="7">07</option>"#,
                r#"</select></li></ul>"#
            )
        );
    }

    #[test]
    fn test_layout_from_format() {
        let field = SelectDate::new("when")
            .with_value(sample())
            .unwrap()
            .with_format("Y-m H")
            .with_range(DateUnit::Year, PickerRange::new(2014, 2014))
            .with_range(DateUnit::Month, PickerRange::new(5, 5))
            .with_range(DateUnit::Hour, PickerRange::new(12, 12));
        let expected = concat!(
            r#"<ul id="when">"#,
            r#"<li><select name="when[year]" class="date year small"><option value="2014" selected="selected">2014</option></select></li>"#,
            r#"<li>-</li>"#,
            r#"<li><select name="when[month]" class="date month small"><option value="5" selected="selected">05</option></select></li>"#,
            r#" "#,
            r#"<li><select name="when[hour]" class="date hour small"><option value="12" selected="selected">12</option></select></li>"#,
            r#"</ul>"#
        );
        assert_eq!(field.render_field(), expected);
    }

    #[test]
    fn test_repeated_unit_renders_component() {
        let field = SelectDate::new("d")
            .with_value(sample())
            .unwrap()
            .with_format("m F")
            .with_range(DateUnit::Month, PickerRange::new(5, 5));
        assert!(field.render_field().ends_with("</select></li> <li>May</li></ul>"));
    }

    #[test]
    fn test_default_year_range() {
        let field = SelectDate::new("d");
        let year = Utc::now().year();
        assert_eq!(field.range(DateUnit::Year), PickerRange::new(year - 25, year + 25));
        assert_eq!(field.range(DateUnit::Minute), PickerRange::new(0, 59));

        let narrow = SelectDate::with_period("d", 1);
        assert_eq!(narrow.range(DateUnit::Year).values().count(), 3);
    }

    #[test]
    fn test_period_saturates_at_year_bounds() {
        let field = SelectDate::with_period("d", i32::MAX);
        let range = field.range(DateUnit::Year);
        assert_eq!(range.to, i32::MAX);
        assert!(range.from < 0);
    }

    #[test]
    fn test_set_value_accepts_date_input_formats() {
        let mut field = SelectDate::new("d");
        field.set_value("2013-05-07").unwrap();
        assert_eq!(field.value().map(|v| v.to_string()).as_deref(), Some("2013-05-07 00:00:00"));

        field.set_value("2013-05-07T14:03:09").unwrap();
        assert_eq!(field.value().map(|v| v.to_string()).as_deref(), Some("2013-05-07 14:03:09"));

        field.set_value("2013-05-07 14:03").unwrap();
        assert_eq!(field.value().map(|v| v.to_string()).as_deref(), Some("2013-05-07 14:03:00"));

        assert!(field.set_value("yesterday").is_err());
    }

    #[test]
    fn test_step() {
        let range = PickerRange::new(0, 59).with_step(15);
        assert_eq!(range.values().collect::<Vec<_>>(), [0, 15, 30, 45]);
    }

    #[test]
    fn test_set_parts() {
        let mut field = SelectDate::new("d").with_value(sample()).unwrap();
        field
            .set_parts([("year", "2020"), ("month", "2"), ("day", "29"), ("other", "x")])
            .unwrap();
        assert_eq!(
            field.value().map(|v| v.to_string()).as_deref(),
            Some("2020-02-29 12:57:33")
        );

        assert!(field.set_parts([("day", "31"), ("month", "4")]).is_err());
        assert!(field.set_parts([("hour", "noon")]).is_err());
    }

    #[test]
    fn test_wrapper_keeps_id_and_class() {
        let mut field = SelectDate::new("name")
            .with_value(sample())
            .unwrap()
            .with_identifier("id")
            .with_label("label")
            .with_required(true)
            .with_class("foo")
            .with_format("s");
        field.set_range(DateUnit::Second, PickerRange::new(33, 33));
        assert_eq!(
            field.render(),
            concat!(
                r#"<label for="id">label<sup>*</sup></label><ul id="id" class="foo">"#,
                r#"<li><select name="name[second]" class="date second small"><option value="33" selected="selected">33</option></select></li>"#,
                r#"</ul>"#
            )
        );
    }

    #[test]
    fn test_condition_on_formatted_value() {
        let mut field = SelectDate::new("d").with_value(sample()).unwrap().with_format("Y");
        field.condition(&Condition::pattern("^20[0-9]{2}$"), "Bad year").unwrap();
        assert!(field.is_valid());
    }

    #[test]
    fn test_picker_range_from_json() {
        let range: PickerRange = serde_json::from_str(r#"{"from": 1990, "to": 2000}"#).unwrap();
        assert_eq!(range, PickerRange::new(1990, 2000));
    }
}
