//! Error types for forms.

use indexmap::IndexMap;
use thiserror::Error;

/// Form-specific errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// The form configuration is malformed or does not match the model.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// An operation was called out of sequence.
    #[error("usage error: {0}")]
    Usage(String),

    /// A render request named an input element that is not declared.
    #[error("unknown element: {0}")]
    UnknownElement(String),

    /// A render request named a button that is not declared.
    #[error("unknown button: {0}")]
    UnknownButton(String),

    /// The configuration document could not be parsed.
    #[error("failed to parse form configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while loading a definition or binding it to a model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A list-typed element has no `items`.
    #[error("element '{element}' of type {kind} requires items")]
    MissingItems {
        /// Element name.
        element: String,
        /// Declared input type.
        kind: String,
    },

    /// The form method is neither GET nor POST.
    #[error("unknown form method '{0}', expected GET or POST")]
    UnknownMethod(String),

    /// An element names a field the bound model does not declare.
    #[error("element '{0}' has no corresponding model field")]
    UnknownField(String),

    /// An element declares an input type that does not exist.
    #[error("element '{element}' has unknown input type '{kind}'")]
    UnknownInputType {
        /// Element name.
        element: String,
        /// The unrecognized type string.
        kind: String,
    },

    /// A button declares a button type that does not exist.
    #[error("button '{button}' has unknown button type '{kind}'")]
    UnknownButtonType {
        /// Button name.
        button: String,
        /// The unrecognized type string.
        kind: String,
    },

    /// An element or button sets an attribute its widget writes itself.
    #[error("'{element}' may not set the '{attribute}' attribute")]
    ReservedAttribute {
        /// Element or button name.
        element: String,
        /// The attribute key.
        attribute: String,
    },

    /// A validation rule in a model schema is invalid.
    #[error("invalid rule for field '{field}': {message}")]
    InvalidRule {
        /// Field name.
        field: String,
        /// What is wrong with the rule.
        message: String,
    },
}

/// Collection of validation errors by field, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub errors: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self {
            errors: IndexMap::new(),
        }
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.values().filter(|m| !m.is_empty()).count()
    }

    /// Returns errors for a specific field.
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field).filter(|m| !m.is_empty())
    }

    /// Returns whether a field has at least one error.
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Removes every error.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Returns all errors as a flat list.
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |msg| (field.as_str(), msg.as_str()))
            })
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
