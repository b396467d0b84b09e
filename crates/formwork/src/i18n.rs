//! Injected translation capability.
//!
//! Every human-readable string in a form configuration, and the few strings
//! the renderer produces on its own, pass through a [`Translator`]. The core
//! never looks messages up itself.

use std::collections::HashMap;

use serde::Deserialize;

/// Translates a message key, substituting `{name}` placeholders from `params`.
pub trait Translator {
    /// Returns the translated message for `key`.
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;
}

/// Translator that returns the key itself with placeholders substituted.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        interpolate(key, params)
    }
}

/// Translator backed by a flat key to message table.
///
/// Keys missing from the table fall back to the key itself.
///
/// ```rust
/// use formwork::i18n::{MessageCatalog, Translator};
///
/// let catalog: MessageCatalog =
///     serde_json::from_str(r#"{"Username": "Benutzername"}"#).unwrap();
/// assert_eq!(catalog.translate("Username", &[]), "Benutzername");
/// assert_eq!(catalog.translate("Password", &[]), "Password");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message.
    #[must_use]
    pub fn message(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(key.into(), message.into());
        self
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns whether the catalog has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for MessageCatalog {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let message = self.messages.get(key).map_or(key, String::as_str);
        interpolate(message, params)
    }
}

fn interpolate(message: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(message.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{name}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_substitutes_params() {
        let t = IdentityTranslator;
        assert_eq!(
            t.translate("{attribute} is too long (maximum is {max}).", &[
                ("attribute", "Username"),
                ("max", "32"),
            ]),
            "Username is too long (maximum is 32)."
        );
    }

    #[test]
    fn test_catalog_lookup_and_fallback() {
        let catalog = MessageCatalog::new()
            .message("Login", "Anmelden")
            .message("Hello {name}", "Hallo {name}");

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.translate("Login", &[]), "Anmelden");
        assert_eq!(catalog.translate("Hello {name}", &[("name", "Alice")]), "Hallo Alice");
        assert_eq!(catalog.translate("Logout", &[]), "Logout");
    }
}
