//! Field validation rules.
//!
//! A rule checks one text value. Models run every rule attached to a field;
//! all rules except [`RequiredValidator`] skip blank values, and multi-valued
//! fields are checked item by item.
//!
//! Rejections are message keys, not final text. A key may hold an
//! `{attribute}` placeholder for the field label plus the placeholders named
//! by [`Validator::params`]; the model fills them in through a
//! [`Translator`](crate::i18n::Translator) when it records the error.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::ConfigurationError;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").expect("valid url pattern"));

/// A validation rule.
pub trait Validator: Send + Sync {
    /// Checks a value, returning the message key when it is rejected.
    fn validate(&self, value: &str) -> Result<(), String>;

    /// Placeholder values for this rule's message keys, besides `attribute`.
    fn params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Whether this rule marks the field as required.
    fn is_required(&self) -> bool {
        false
    }
}

/// Rejects blank values.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates the rule with the default message.
    pub fn new() -> Self {
        Self::with_message("{attribute} cannot be blank.")
    }

    /// Creates the rule with a custom message key.
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
        if value.trim().is_empty() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn is_required(&self) -> bool {
        true
    }
}

/// Bounds the length of a value, counted in characters.
#[derive(Debug, Clone)]
pub struct LengthValidator {
    min: Option<usize>,
    max: Option<usize>,
}

impl LengthValidator {
    /// At most `max` characters.
    pub fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// At least `min` characters.
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Between `min` and `max` characters, inclusive.
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

impl Validator for LengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let len = value.chars().count();
        match (self.min, self.max) {
            (Some(min), _) if len < min => {
                Err("{attribute} should contain at least {min} characters.".to_string())
            }
            (_, Some(max)) if len > max => {
                Err("{attribute} should contain at most {max} characters.".to_string())
            }
            _ => Ok(()),
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        bound_params(self.min, self.max)
    }
}

/// Accepts values matching a regular expression.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: Regex,
    message: String,
}

impl PatternValidator {
    /// Compiles `pattern`.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    /// Email addresses.
    pub fn email() -> Self {
        Self {
            pattern: EMAIL.clone(),
            message: "{attribute} is not a valid email address.".to_string(),
        }
    }

    /// Absolute `http` and `https` URLs.
    pub fn url() -> Self {
        Self {
            pattern: URL.clone(),
            message: "{attribute} is not a valid URL.".to_string(),
        }
    }

    /// Replaces the error message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for PatternValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.pattern.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Accepts numbers, optionally integers only, within optional bounds.
#[derive(Debug, Clone, Default)]
pub struct NumberValidator {
    min: Option<f64>,
    max: Option<f64>,
    integer_only: bool,
}

impl NumberValidator {
    /// Accepts any finite number between the given bounds, inclusive.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            integer_only: false,
        }
    }

    /// Rejects values with a fractional part or exponent.
    #[must_use]
    pub fn integer_only(mut self) -> Self {
        self.integer_only = true;
        self
    }
}

impl Validator for NumberValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let value = value.trim();
        let number = if self.integer_only {
            value
                .parse::<i64>()
                .map(|n| n as f64)
                .map_err(|_| "{attribute} must be an integer.".to_string())?
        } else {
            value
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| "{attribute} must be a number.".to_string())?
        };

        if self.min.is_some_and(|min| number < min) {
            return Err("{attribute} must be no less than {min}.".to_string());
        }
        if self.max.is_some_and(|max| number > max) {
            return Err("{attribute} must be no greater than {max}.".to_string());
        }
        Ok(())
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        bound_params(self.min, self.max)
    }
}

/// Accepts only values from a fixed set.
#[derive(Debug, Clone)]
pub struct ChoiceValidator {
    choices: Vec<String>,
    message: String,
}

impl ChoiceValidator {
    /// Accepts exactly the given values.
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            message: "{attribute} is invalid.".to_string(),
        }
    }

    /// Replaces the error message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for ChoiceValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.choices.iter().any(|c| c == value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// A validation rule as written in a model schema.
///
/// ```json
/// { "rule": "length", "max": 32 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Non-blank value.
    Required {
        #[serde(default)]
        message: Option<String>,
    },
    /// Length bounds in characters.
    Length {
        #[serde(default)]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
    },
    /// Email address.
    Email {
        #[serde(default)]
        message: Option<String>,
    },
    /// Absolute http(s) URL.
    Url {
        #[serde(default)]
        message: Option<String>,
    },
    /// Regular expression match.
    Match {
        pattern: String,
        #[serde(default)]
        message: Option<String>,
    },
    /// Numeric value within optional bounds.
    Number {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        integer_only: bool,
    },
    /// One of a fixed set of values.
    In {
        values: Vec<String>,
        #[serde(default)]
        message: Option<String>,
    },
}

impl RuleConfig {
    /// Builds the validator this rule stands for.
    pub fn build(&self, field: &str) -> Result<Box<dyn Validator>, ConfigurationError> {
        let invalid = |message: String| ConfigurationError::InvalidRule {
            field: field.to_string(),
            message,
        };

        Ok(match self {
            Self::Required { message } => Box::new(match message {
                Some(m) => RequiredValidator::with_message(m),
                None => RequiredValidator::new(),
            }),
            Self::Length { min, max } => match (*min, *max) {
                (None, None) => return Err(invalid("length rule needs min or max".to_string())),
                (Some(min), Some(max)) if min > max => {
                    return Err(invalid(format!("min {min} exceeds max {max}")));
                }
                (Some(min), Some(max)) => Box::new(LengthValidator::between(min, max)),
                (Some(min), None) => Box::new(LengthValidator::min(min)),
                (None, Some(max)) => Box::new(LengthValidator::max(max)),
            },
            Self::Email { message } => Box::new(with_optional_message(PatternValidator::email(), message)),
            Self::Url { message } => Box::new(with_optional_message(PatternValidator::url(), message)),
            Self::Match { pattern, message } => {
                let message = message.as_deref().unwrap_or("{attribute} is invalid.");
                Box::new(PatternValidator::new(pattern, message).map_err(|e| invalid(e.to_string()))?)
            }
            Self::Number {
                min,
                max,
                integer_only,
            } => {
                let validator = NumberValidator::new(*min, *max);
                Box::new(if *integer_only {
                    validator.integer_only()
                } else {
                    validator
                })
            }
            Self::In { values, message } => {
                let validator = ChoiceValidator::new(values.iter().cloned());
                Box::new(match message {
                    Some(m) => validator.with_message(m),
                    None => validator,
                })
            }
        })
    }
}

fn bound_params<T: ToString>(min: Option<T>, max: Option<T>) -> Vec<(&'static str, String)> {
    [("min", min), ("max", max)]
        .into_iter()
        .filter_map(|(key, bound)| bound.map(|b| (key, b.to_string())))
        .collect()
}

fn with_optional_message(validator: PatternValidator, message: &Option<String>) -> PatternValidator {
    match message {
        Some(m) => validator.with_message(m),
        None => validator,
    }
}
