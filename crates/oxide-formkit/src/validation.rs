//! Stock validators.
//!
//! A validator carries its own message, so it can be run on a field with
//! [`Field::validate`](crate::Field::validate) or wrapped as a
//! [`Condition`](crate::Condition) with [`Condition::validator`](crate::Condition::validator).

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("EMAIL_RE: invalid regex pattern")
});

// Scheme, host labels without edge hyphens, then optional port, path,
// query and fragment.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9\-]*[a-zA-Z0-9])?)*(:[0-9]{1,5})?(/[^\s?#]*)?(\?[^\s#]*)?(#[^\s]*)?$",
    )
    .expect("URL_RE: invalid regex pattern")
});

/// A reusable check on one submitted value.
pub trait Validator: Send + Sync {
    /// Returns the message as the error when `value` does not pass.
    fn validate(&self, value: &str) -> Result<(), String>;

    /// Message shown on the field when the check fails.
    fn message(&self) -> &str;
}

/// Requires a non-blank value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    pub fn new() -> Self {
        Self::with_message("This field is required.")
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        check(!value.trim().is_empty(), &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Bounds the number of characters in a value.
#[derive(Debug, Clone)]
pub struct LengthValidator {
    min: Option<usize>,
    max: Option<usize>,
    message: String,
}

impl LengthValidator {
    /// Requires at most `max` characters.
    pub fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
            message: format!("Ensure this value has at most {max} characters."),
        }
    }

    /// Requires at least `min` characters.
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
            message: format!("Ensure this value has at least {min} characters."),
        }
    }

    /// Replaces the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for LengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let len = value.chars().count();
        let fits =
            self.min.is_none_or(|min| len >= min) && self.max.is_none_or(|max| len <= max);
        check(fits, &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Checks the shape of an email address.
#[derive(Debug, Clone, Default)]
pub struct EmailValidator {
    message: Option<String>,
}

impl EmailValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        check(EMAIL_RE.is_match(value), self.message())
    }

    fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("Enter a valid email address.")
    }
}

/// Accepts `http` and `https` URLs with a well-formed host.
#[derive(Debug, Clone, Default)]
pub struct UrlValidator {
    message: Option<String>,
}

impl UrlValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Validator for UrlValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        check(URL_RE.is_match(value), self.message())
    }

    fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("Enter a valid URL.")
    }
}

fn check(passed: bool, message: &str) -> Result<(), String> {
    if passed {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

/// Bounds a numeric value. Text that is not a number fails.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
    message: String,
}

impl RangeValidator {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let message = match (min, max) {
            (Some(min), Some(max)) => format!("Value must be between {min} and {max}."),
            (Some(min), None) => format!("Value must be at least {min}."),
            (None, Some(max)) => format!("Value must be at most {max}."),
            (None, None) => "Invalid value.".to_string(),
        };
        Self { min, max, message }
    }
}

impl Validator for RangeValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let Ok(num) = value.trim().parse::<f64>() else {
            return Err(self.message.clone());
        };
        let fits =
            self.min.is_none_or(|min| num >= min) && self.max.is_none_or(|max| num <= max);
        check(fits, &self.message)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validator() {
        let v = RequiredValidator::new();
        assert!(v.validate("hello").is_ok());
        assert!(v.validate("").is_err());
        assert!(v.validate("   ").is_err());
    }

    #[test]
    fn test_length_validator_counts_chars() {
        let v = LengthValidator::max(5);
        assert!(v.validate("hello").is_ok());
        assert!(v.validate("żółwś").is_ok());
        assert!(v.validate("hello world").is_err());

        let v = LengthValidator::min(3).with_message("Too short");
        assert!(v.validate("abc").is_ok());
        assert_eq!(v.validate("ab"), Err("Too short".to_string()));
    }

    #[test]
    fn test_email_validator() {
        let v = EmailValidator::new();
        assert!(v.validate("user@example.com").is_ok());
        assert!(v.validate("user.name@domain.co.uk").is_ok());
        assert!(v.validate("invalid").is_err());
        assert!(v.validate("@example.com").is_err());
    }

    #[test]
    fn test_url_validator() {
        let v = UrlValidator::new();
        assert!(v.validate("https://example.com").is_ok());
        assert!(v.validate("http://localhost:8080/path?q=1#top").is_ok());
        assert!(v.validate("example.com").is_err());
        assert!(v.validate("https://-bad.com").is_err());
        assert!(v.validate("ftp://example.com").is_err());
    }

    #[test]
    fn test_custom_messages() {
        let v = EmailValidator::new().with_message("Bad email");
        assert_eq!(v.validate("x"), Err("Bad email".to_string()));
        assert_eq!(UrlValidator::new().message(), "Enter a valid URL.");
    }

    #[test]
    fn test_range_validator() {
        let v = RangeValidator::new(Some(0.0), Some(100.0));
        assert!(v.validate("50").is_ok());
        assert!(v.validate("100").is_ok());
        assert!(v.validate("-1").is_err());
        assert!(v.validate("abc").is_err());
    }
}
