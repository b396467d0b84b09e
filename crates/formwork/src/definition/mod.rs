//! Declarative form definitions.
//!
//! A [`FormDefinition`] is the immutable description of a form: its
//! metadata, its input elements and its buttons, each in document order. It
//! knows nothing about data; binding to a model happens in [`crate::Form`].

mod element;

pub use element::{
    ButtonConfig, ButtonElement, ButtonType, ElementConfig, InputElement, InputType,
    CHECK_LAYOUT, DEFAULT_LAYOUT,
};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigurationError, Result};
use crate::html::Attributes;
use crate::i18n::Translator;
use crate::request::Method;

/// A form configuration document before validation.
///
/// Top-level keys other than the named ones become attributes of the
/// `<form>` tag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormConfig {
    /// Form title.
    #[serde(default)]
    pub title: Option<String>,
    /// Form description.
    #[serde(default)]
    pub description: Option<String>,
    /// `GET` or `POST`; `POST` when absent.
    #[serde(default)]
    pub method: Option<String>,
    /// Target URL; the current request URL when absent.
    #[serde(default)]
    pub action: Option<String>,
    /// Input elements in display order.
    #[serde(default)]
    pub elements: IndexMap<String, ElementConfig>,
    /// Buttons in display order.
    #[serde(default)]
    pub buttons: IndexMap<String, ButtonConfig>,
    /// Every remaining key.
    #[serde(flatten)]
    pub attributes: IndexMap<String, Value>,
}

/// Immutable, validated description of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefinition {
    title: Option<String>,
    description: Option<String>,
    method: Method,
    action: Option<String>,
    elements: IndexMap<String, InputElement>,
    buttons: IndexMap<String, ButtonElement>,
    attributes: Attributes,
}

impl FormDefinition {
    /// Validates a configuration and builds the definition.
    ///
    /// Human-readable strings are translated here, once.
    pub fn load(
        config: FormConfig,
        translator: &dyn Translator,
    ) -> std::result::Result<Self, ConfigurationError> {
        let method = match config.method.as_deref() {
            None => Method::Post,
            Some(m) => {
                Method::parse(m).ok_or_else(|| ConfigurationError::UnknownMethod(m.to_string()))?
            }
        };

        let elements = config
            .elements
            .into_iter()
            .map(|(name, element)| {
                let element = element.build(&name, translator)?;
                Ok((name, element))
            })
            .collect::<std::result::Result<IndexMap<_, _>, ConfigurationError>>()?;

        let buttons = config
            .buttons
            .into_iter()
            .map(|(name, button)| {
                let button = button.build(&name, translator)?;
                Ok((name, button))
            })
            .collect::<std::result::Result<IndexMap<_, _>, ConfigurationError>>()?;

        let definition = Self {
            title: config.title.map(|t| translator.translate(&t, &[])),
            description: config.description.map(|d| translator.translate(&d, &[])),
            method,
            action: config.action,
            elements,
            buttons,
            attributes: element::collect_attributes(config.attributes),
        };

        debug!(
            elements = definition.elements.len(),
            buttons = definition.buttons.len(),
            method = %definition.method,
            "loaded form definition"
        );

        Ok(definition)
    }

    /// Parses a JSON configuration document and builds the definition.
    ///
    /// ```rust
    /// use formwork::definition::{FormDefinition, InputType};
    /// use formwork::i18n::IdentityTranslator;
    ///
    /// let definition = FormDefinition::from_json(
    ///     r#"{
    ///         "title": "Login",
    ///         "elements": {
    ///             "username": {"type": "text", "maxlength": 32},
    ///             "password": {"type": "password"}
    ///         },
    ///         "buttons": {"login": {"type": "submit", "label": "Login"}}
    ///     }"#,
    ///     &IdentityTranslator,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(definition.title(), Some("Login"));
    /// assert_eq!(definition.element("password").unwrap().kind, InputType::Password);
    /// ```
    pub fn from_json(document: &str, translator: &dyn Translator) -> Result<Self> {
        let config: FormConfig = serde_json::from_str(document)?;
        Ok(Self::load(config, translator)?)
    }

    /// Form title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Form description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Submission method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Configured action URL.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Attributes of the `<form>` tag.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Looks up an input element.
    pub fn element(&self, name: &str) -> Option<&InputElement> {
        self.elements.get(name)
    }

    /// Input elements in display order.
    pub fn elements(&self) -> impl Iterator<Item = &InputElement> {
        self.elements.values()
    }

    /// Looks up a button.
    pub fn button(&self, name: &str) -> Option<&ButtonElement> {
        self.buttons.get(name)
    }

    /// Buttons in display order.
    pub fn buttons(&self) -> impl Iterator<Item = &ButtonElement> {
        self.buttons.values()
    }

    /// Whether any element uploads a file.
    pub fn has_file_input(&self) -> bool {
        self.elements().any(|e| e.kind == InputType::File)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use crate::i18n::{IdentityTranslator, MessageCatalog};

    #[test]
    fn test_defaults() {
        let definition = FormDefinition::from_json("{}", &IdentityTranslator).unwrap();
        assert_eq!(definition.method(), Method::Post);
        assert_eq!(definition.title(), None);
        assert_eq!(definition.action(), None);
        assert_eq!(definition.elements().count(), 0);
        assert!(!definition.has_file_input());
    }

    #[test]
    fn test_method_is_case_insensitive() {
        let definition =
            FormDefinition::from_json(r#"{"method": "get"}"#, &IdentityTranslator).unwrap();
        assert_eq!(definition.method(), Method::Get);
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let err = FormDefinition::from_json(r#"{"method": "PUT"}"#, &IdentityTranslator)
            .unwrap_err();
        assert!(matches!(
            err,
            FormError::Configuration(ConfigurationError::UnknownMethod(ref m)) if m == "PUT"
        ));
    }

    #[test]
    fn test_list_element_without_items_fails_to_load() {
        for kind in ["listbox", "dropdownlist", "checkboxlist", "radiolist"] {
            let document = format!(r#"{{"elements": {{"choice": {{"type": "{kind}"}}}}}}"#);
            let err = FormDefinition::from_json(&document, &IdentityTranslator).unwrap_err();
            assert!(
                matches!(
                    err,
                    FormError::Configuration(ConfigurationError::MissingItems { .. })
                ),
                "{kind} loaded without items"
            );
        }
    }

    #[test]
    fn test_elements_and_buttons_keep_document_order() {
        let definition = FormDefinition::from_json(
            r#"{
                "elements": {"zeta": {}, "alpha": {}, "mid": {"type": "file"}},
                "buttons": {"update": {}, "delete": {}, "duplicate": {"type": "htmlSubmit"}}
            }"#,
            &IdentityTranslator,
        )
        .unwrap();

        let names: Vec<_> = definition.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        let buttons: Vec<_> = definition.buttons().map(|b| b.name.as_str()).collect();
        assert_eq!(buttons, vec!["update", "delete", "duplicate"]);
        assert_eq!(definition.button("update").unwrap().kind, ButtonType::Submit);
        assert!(definition.has_file_input());
    }

    #[test]
    fn test_strings_are_translated_at_load() {
        let catalog = MessageCatalog::new()
            .message("Sign in", "Anmelden")
            .message("Male", "Männlich");
        let definition = FormDefinition::from_json(
            r#"{
                "title": "Sign in",
                "elements": {"gender": {"type": "radiolist", "items": {"m": "Male"}}},
                "buttons": {"go": {"label": "Sign in"}}
            }"#,
            &catalog,
        )
        .unwrap();

        assert_eq!(definition.title(), Some("Anmelden"));
        assert_eq!(definition.button("go").unwrap().label.as_deref(), Some("Anmelden"));
        let items = definition.element("gender").unwrap().items.as_ref().unwrap();
        assert_eq!(items.get("m").map(String::as_str), Some("Männlich"));
    }

    #[test]
    fn test_top_level_residual_keys_become_form_attributes() {
        let definition = FormDefinition::from_json(
            r#"{"title": "Search", "class": "search-form", "novalidate": true}"#,
            &IdentityTranslator,
        )
        .unwrap();
        assert_eq!(
            definition.attributes(),
            &Attributes::new()
                .with("class", "search-form")
                .with("novalidate", "novalidate")
        );
    }
}
