//! Validation conditions attached to fields.

use regex::Regex;

use crate::error::{FormError, Result};
use crate::validation::Validator;

/// A validation rule evaluated against a field's current value.
///
/// Multi-valued fields pass only if every value passes.
pub enum Condition {
    /// Regular expression the value must match. A pattern written with
    /// delimiters and flags, such as `/^[a-z]+$/i`, is accepted too.
    Pattern(String),
    /// The value must be one of these.
    OneOf(Vec<String>),
    /// The value must satisfy the predicate.
    Predicate(Box<dyn Fn(&str) -> bool>),
    /// Fixed outcome, decided by the caller.
    Literal(bool),
}

impl std::fmt::Debug for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pattern(p) => f.debug_tuple("Pattern").field(p).finish(),
            Self::OneOf(values) => f.debug_tuple("OneOf").field(values).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Literal(b) => f.debug_tuple("Literal").field(b).finish(),
        }
    }
}

impl Condition {
    /// Creates a pattern condition.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(pattern.into())
    }

    /// Creates a membership condition.
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Creates a predicate condition.
    pub fn predicate(f: impl Fn(&str) -> bool + 'static) -> Self {
        Self::Predicate(Box::new(f))
    }

    /// Wraps a stock validator as a predicate condition.
    pub fn validator(validator: impl Validator + 'static) -> Self {
        Self::predicate(move |value| validator.validate(value).is_ok())
    }

    /// Evaluates the condition for `field` against its values.
    ///
    /// A field without values is checked as a single empty string.
    pub fn evaluate(&self, field: &str, values: &[String]) -> Result<bool> {
        let empty = [String::new()];
        let values = if values.is_empty() { &empty[..] } else { values };

        let passed = match self {
            Self::Literal(outcome) => *outcome,
            Self::Pattern(pattern) => {
                let re = compile(field, pattern)?;
                values.iter().all(|v| re.is_match(v))
            }
            Self::OneOf(allowed) => values.iter().all(|v| allowed.contains(v)),
            Self::Predicate(f) => values.iter().all(|v| f(v)),
        };
        Ok(passed)
    }
}

impl From<bool> for Condition {
    fn from(outcome: bool) -> Self {
        Self::Literal(outcome)
    }
}

fn compile(field: &str, pattern: &str) -> Result<Regex> {
    let source = match delimited(pattern) {
        Some((body, flags)) => {
            let flags: String = flags.chars().filter(|c| "imsx".contains(*c)).collect();
            if flags.is_empty() {
                body.to_string()
            } else {
                format!("(?{flags}){body}")
            }
        }
        None => pattern.to_string(),
    };

    Regex::new(&source).map_err(|e| FormError::Condition {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

fn delimited(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let end = rest.rfind('/')?;
    let flags = &rest[end + 1..];
    if flags.chars().all(|c| c.is_ascii_alphabetic()) {
        Some((&rest[..end], flags))
    } else {
        None
    }
}
