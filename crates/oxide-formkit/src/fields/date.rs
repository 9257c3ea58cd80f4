//! Date and time field, and the format letters shared with [`SelectDate`](crate::SelectDate).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::bag::AttrValue;
use crate::element::{impl_element, Field, FieldCore};
use crate::error::{FormError, Result};

/// Render format used unless [`Date::set_format`] is called.
pub const DEFAULT_FORMAT: &str = "Y-m-d H:i:s";

const DEFAULT_INPUT_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Formats tried when coercing text, shared by every date field.
pub(crate) fn default_input_formats() -> Vec<String> {
    DEFAULT_INPUT_FORMATS.iter().map(|f| (*f).to_string()).collect()
}

/// Translates format letters (`Y-m-d H:i:s` style) into a chrono
/// `strftime` pattern. A backslash makes the next character literal.
pub(crate) fn strftime_pattern(format: &str) -> String {
    let mut pattern = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();
    while let Some(ch) = chars.next() {
        let spec = match ch {
            '\\' => {
                if let Some(literal) = chars.next() {
                    push_literal(&mut pattern, literal);
                }
                continue;
            }
            'Y' => "%Y",
            'y' => "%y",
            'm' => "%m",
            'n' => "%-m",
            'd' => "%d",
            'j' => "%-d",
            'H' => "%H",
            'G' => "%-H",
            'h' => "%I",
            'g' => "%-I",
            'i' => "%M",
            's' => "%S",
            'A' => "%p",
            'a' => "%P",
            'D' => "%a",
            'l' => "%A",
            'M' => "%b",
            'F' => "%B",
            'N' => "%u",
            'w' => "%w",
            'z' => "%j",
            'U' => "%s",
            other => {
                push_literal(&mut pattern, other);
                continue;
            }
        };
        pattern.push_str(spec);
    }
    pattern
}

fn push_literal(pattern: &mut String, ch: char) {
    if ch == '%' {
        pattern.push_str("%%");
    } else {
        pattern.push(ch);
    }
}

/// Formats a date with format letters.
pub(crate) fn format_date(value: &NaiveDateTime, format: &str) -> String {
    value.format(&strftime_pattern(format)).to_string()
}

/// A value accepted by [`Date::set_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Unix timestamp in seconds.
    Timestamp(i64),
    /// Text to parse.
    Text(String),
    /// Already parsed date and time.
    DateTime(NaiveDateTime),
}

impl From<i64> for DateInput {
    fn from(timestamp: i64) -> Self {
        Self::Timestamp(timestamp)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value.naive_utc())
    }
}

/// Coerces an input into a date, trying each of `input_formats`, then a
/// bare date (midnight), RFC 3339 and finally an all-digit timestamp.
pub(crate) fn coerce(field: &str, input: DateInput, input_formats: &[String]) -> Result<NaiveDateTime> {
    let text = match input {
        DateInput::DateTime(value) => return Ok(value),
        DateInput::Timestamp(secs) => return from_timestamp(field, secs),
        DateInput::Text(text) => text,
    };
    let text = text.trim();

    for fmt in input_formats {
        if let Ok(value) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(value);
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight);
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Ok(value.naive_local());
    }
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        let secs = text.parse().map_err(|_| invalid(field, text))?;
        return from_timestamp(field, secs);
    }
    Err(invalid(field, text))
}

fn from_timestamp(field: &str, secs: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0)
        .map(|value| value.naive_utc())
        .ok_or_else(|| invalid(field, &secs.to_string()))
}

fn invalid(field: &str, text: &str) -> FormError {
    FormError::InvalidValue {
        field: field.to_string(),
        message: format!("cannot read {text:?} as a date"),
    }
}

/// A date and time rendered as a single `<input type="datetime">`.
///
/// Conditions are checked against the formatted value.
#[derive(Debug, Clone)]
pub struct Date {
    core: FieldCore,
    value: Option<NaiveDateTime>,
    format: String,
    input_formats: Vec<String>,
}

impl Date {
    /// Creates an empty date field.
    pub fn new(name: &str) -> Self {
        Self {
            core: FieldCore::new(name),
            value: None,
            format: DEFAULT_FORMAT.to_string(),
            input_formats: default_input_formats(),
        }
    }

    /// Builder method to set the value.
    pub fn with_value(mut self, input: impl Into<DateInput>) -> Result<Self> {
        self.set_value(input)?;
        Ok(self)
    }

    /// Builder method to set the render format.
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.set_format(format);
        self
    }

    /// Builder method to replace the `strftime` patterns text input is
    /// parsed with.
    #[must_use]
    pub fn with_input_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the value.
    pub fn value(&self) -> Option<NaiveDateTime> {
        self.value
    }

    /// Sets the value from a timestamp, text or a parsed date.
    pub fn set_value(&mut self, input: impl Into<DateInput>) -> Result<()> {
        self.value = Some(coerce(self.name(), input.into(), &self.input_formats)?);
        Ok(())
    }

    /// Removes the value.
    pub fn clear_value(&mut self) {
        self.value = None;
    }

    /// Returns the render format.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Sets the render format.
    pub fn set_format(&mut self, format: &str) {
        self.format = format.to_string();
    }

    /// Returns the value rendered with the format.
    pub fn formatted(&self) -> Option<String> {
        self.value.as_ref().map(|v| format_date(v, &self.format))
    }
}

impl Field for Date {
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
        self.formatted().into_iter().collect()
    }

    fn render_field(&self) -> String {
        format!(
            "<input {}/>",
            self.attributes().render_with(&[
                ("type", Some(AttrValue::from("datetime"))),
                ("value", self.formatted().map(AttrValue::from)),
            ])
        )
    }
}

impl_element!(Date);
