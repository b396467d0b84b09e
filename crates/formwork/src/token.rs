//! Request-integrity tokens.
//!
//! A fresh token is embedded as a hidden field every time a form is rendered
//! and must come back unchanged for a submission to count. Storage belongs
//! to the session layer; [`SessionTokens`] is an in-memory stand-in holding
//! the token of one session.

use subtle::ConstantTimeEq;

/// Default name of the hidden token field.
pub const DEFAULT_TOKEN_FIELD: &str = "_token";

/// Session-side storage of the expected integrity token.
pub trait TokenStore {
    /// Name of the hidden field carrying the token.
    fn field_name(&self) -> &str {
        DEFAULT_TOKEN_FIELD
    }

    /// Generates a new token, remembers it as expected, and returns it.
    fn issue(&mut self) -> String;

    /// The token the next submission must carry.
    fn expected(&self) -> Option<&str>;

    /// Checks a submitted token against the expected one in constant time.
    fn verify(&self, submitted: Option<&str>) -> bool {
        match (self.expected(), submitted) {
            (Some(expected), Some(submitted)) => {
                bool::from(expected.as_bytes().ct_eq(submitted.as_bytes()))
            }
            _ => false,
        }
    }
}

/// In-memory token store for one session.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    field_name: String,
    token: Option<String>,
}

impl SessionTokens {
    /// Creates a store with no token issued yet.
    pub fn new() -> Self {
        Self {
            field_name: DEFAULT_TOKEN_FIELD.to_string(),
            token: None,
        }
    }

    /// Uses a custom hidden field name.
    #[must_use]
    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    /// Restores a store from a token kept elsewhere in the session.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl Default for SessionTokens {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for SessionTokens {
    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn issue(&mut self) -> String {
        let token = generate_token();
        self.token = Some(token.clone());
        token
    }

    fn expected(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Generates a cryptographically secure token.
fn generate_token() -> String {
    use rand::RngExt;
    let mut rng = rand::rng();
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes);
    hex::encode(&bytes)
}

mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_eq!(t1.len(), 64);
        assert!(t1.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(t1, t2);
    }

    #[test]
    fn test_issue_replaces_expected_token() {
        let mut store = SessionTokens::new();
        assert_eq!(store.expected(), None);

        let first = store.issue();
        assert!(store.verify(Some(&first)));

        let second = store.issue();
        assert!(!store.verify(Some(&first)));
        assert!(store.verify(Some(&second)));
    }

    #[test]
    fn test_verify_rejects_missing_or_wrong_tokens() {
        let store = SessionTokens::new().with_token("abc123");
        assert!(store.verify(Some("abc123")));
        assert!(!store.verify(Some("abc124")));
        assert!(!store.verify(Some("abc")));
        assert!(!store.verify(None));
        assert!(!SessionTokens::new().verify(Some("")));
    }

    #[test]
    fn test_custom_field_name() {
        let store = SessionTokens::new().with_field_name("csrf_token");
        assert_eq!(store.field_name(), "csrf_token");
        assert_eq!(SessionTokens::new().field_name(), DEFAULT_TOKEN_FIELD);
    }
}
