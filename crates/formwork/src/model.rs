//! Data-holding models that forms bind to.
//!
//! A [`FormModel`] owns field values, the rules attached to each field, and
//! the errors the last validation run produced. [`DynamicModel`] is a
//! schema-driven implementation for callers that have no domain type.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{ConfigurationError, ValidationErrors};
use crate::i18n::{IdentityTranslator, Translator};
use crate::validation::{RuleConfig, Validator};

/// A dynamically typed field value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValue {
    /// No value has been assigned.
    #[default]
    Null,
    /// Boolean flag (checkboxes, single radios).
    Bool(bool),
    /// Single text value.
    Text(String),
    /// Several selected values (list boxes, checkbox lists).
    List(Vec<String>),
}

impl FieldValue {
    /// Returns whether the value counts as blank for validation.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(_) => false,
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.iter().all(|s| s.trim().is_empty()),
        }
    }

    /// Returns the value as submitted text, if it has a single one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a flag, interpreting `"1"`, `"on"` and `"true"`.
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => matches!(s.as_str(), "1" | "on" | "true"),
            Self::Null | Self::List(_) => false,
        }
    }

    /// Returns whether `option` is the current value or one of them.
    pub fn matches(&self, option: &str) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => option == if *b { "1" } else { "0" },
            Self::Text(s) => s == option,
            Self::List(items) => items.iter().any(|s| s == option),
        }
    }

    /// Returns every text this value holds, for rule checking.
    pub fn texts(&self) -> Vec<String> {
        match self {
            Self::Null => Vec::new(),
            Self::Bool(b) => vec![if *b { "1" } else { "0" }.to_string()],
            Self::Text(s) => vec![s.clone()],
            Self::List(items) => items.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Capability set a form needs from the model it is bound to.
pub trait FormModel {
    /// Names of the declared fields, in declaration order.
    fn field_names(&self) -> Vec<&str>;

    /// Returns whether `name` is a declared field.
    fn has_field(&self, name: &str) -> bool {
        self.field_names().contains(&name)
    }

    /// Current value of a field.
    fn field(&self, name: &str) -> Option<&FieldValue>;

    /// Assigns a field value. Unknown names are ignored.
    fn set_field(&mut self, name: &str, value: FieldValue);

    /// Display label for a field.
    fn label_for(&self, name: &str) -> String {
        humanize(name)
    }

    /// Validation rules attached to a field.
    fn rules_for(&self, name: &str) -> &[Box<dyn Validator>];

    /// Errors from the last validation run.
    fn errors(&self) -> &ValidationErrors;

    /// Mutable access to the error collection.
    fn errors_mut(&mut self) -> &mut ValidationErrors;

    /// Returns whether a required rule is attached to `name`.
    fn is_required(&self, name: &str) -> bool {
        self.rules_for(name).iter().any(|rule| rule.is_required())
    }

    /// Runs every rule of every field, replacing the error collection.
    ///
    /// Returns true iff no field has an error.
    fn validate(&mut self) -> bool {
        self.validate_with(&IdentityTranslator)
    }

    /// Like [`FormModel::validate`], translating each message and naming the
    /// field by its translated label.
    fn validate_with(&mut self, translator: &dyn Translator) -> bool {
        let mut errors = ValidationErrors::new();
        for name in self.field_names() {
            let value = self.field(name).cloned().unwrap_or_default();
            let mut attribute = None;
            for rule in self.rules_for(name) {
                if let Err(key) = check_rule(rule.as_ref(), &value) {
                    let label = attribute
                        .get_or_insert_with(|| translator.translate(&self.label_for(name), &[]));
                    errors.add(name, error_message(translator, &key, label, rule.as_ref()));
                }
            }
        }
        *self.errors_mut() = errors;
        self.errors().is_empty()
    }
}

fn error_message(
    translator: &dyn Translator,
    key: &str,
    label: &str,
    rule: &dyn Validator,
) -> String {
    let rule_params = rule.params();
    let params: Vec<(&str, &str)> = std::iter::once(("attribute", label))
        .chain(rule_params.iter().map(|(k, v)| (*k, v.as_str())))
        .collect();
    translator.translate(key, &params)
}

fn check_rule(rule: &dyn Validator, value: &FieldValue) -> Result<(), String> {
    if rule.is_required() {
        return if value.is_blank() {
            rule.validate("")
        } else {
            Ok(())
        };
    }
    if value.is_blank() {
        return Ok(());
    }
    value
        .texts()
        .iter()
        .try_for_each(|text| rule.validate(text))
}

/// Turns a field name into a label: `first_name` becomes `First Name`.
pub fn humanize(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c == '.')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Definition of one field of a [`DynamicModel`].
pub struct ModelField {
    /// Field name.
    pub name: String,
    /// Field label.
    pub label: Option<String>,
    /// Validation rules.
    pub rules: Vec<Box<dyn Validator>>,
    /// Current value.
    pub value: FieldValue,
}

impl std::fmt::Debug for ModelField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelField")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("rules", &self.rules.len())
            .field("value", &self.value)
            .finish()
    }
}

impl ModelField {
    /// Creates a new field with no rules and no value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            rules: Vec::new(),
            value: FieldValue::Null,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Adds a validation rule.
    #[must_use]
    pub fn rule(mut self, rule: impl Validator + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = value.into();
        self
    }
}

/// A model whose fields are declared at runtime.
///
/// ```rust
/// use formwork::model::{DynamicModel, FormModel, ModelField};
/// use formwork::validation::RequiredValidator;
///
/// let mut model = DynamicModel::new()
///     .with_field(ModelField::new("username").rule(RequiredValidator::new()))
///     .with_field(ModelField::new("remember_me"));
///
/// assert!(!model.validate());
/// model.set_field("username", "alice".into());
/// assert!(model.validate());
/// assert_eq!(model.label_for("remember_me"), "Remember Me");
/// ```
#[derive(Debug, Default)]
pub struct DynamicModel {
    fields: IndexMap<String, ModelField>,
    errors: ValidationErrors,
}

impl DynamicModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field.
    #[must_use]
    pub fn with_field(mut self, field: ModelField) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Builds a model from a parsed schema.
    pub fn from_schema(schema: &ModelSchema) -> Result<Self, ConfigurationError> {
        let mut model = Self::new();
        for (name, spec) in &schema.fields {
            let mut field = ModelField::new(name.as_str());
            field.label = spec.label.clone();
            for rule in &spec.rules {
                field.rules.push(rule.build(name)?);
            }
            model = model.with_field(field);
        }
        Ok(model)
    }

    /// Parses a JSON schema document and builds a model from it.
    pub fn from_json(document: &str) -> crate::Result<Self> {
        let schema: ModelSchema = serde_json::from_str(document)?;
        Ok(Self::from_schema(&schema)?)
    }
}

impl FormModel for DynamicModel {
    fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).map(|f| &f.value)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) {
        if let Some(field) = self.fields.get_mut(name) {
            field.value = value;
        }
    }

    fn label_for(&self, name: &str) -> String {
        self.fields
            .get(name)
            .and_then(|f| f.label.clone())
            .unwrap_or_else(|| humanize(name))
    }

    fn rules_for(&self, name: &str) -> &[Box<dyn Validator>] {
        match self.fields.get(name) {
            Some(field) => &field.rules,
            None => &[],
        }
    }

    fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut ValidationErrors {
        &mut self.errors
    }
}

/// JSON shape of a [`DynamicModel`].
///
/// ```json
/// { "fields": { "username": { "label": "Username", "rules": [{ "rule": "required" }] } } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSchema {
    /// Field specifications in declaration order.
    #[serde(default)]
    pub fields: IndexMap<String, FieldSchema>,
}

/// JSON shape of one model field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSchema {
    /// Display label.
    #[serde(default)]
    pub label: Option<String>,
    /// Validation rules.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}
