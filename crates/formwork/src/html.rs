//! HTML escaping and attribute lists.

use indexmap::IndexMap;

/// Ordered presentation attributes of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    /// HTML attributes in insertion order.
    pub attrs: IndexMap<String, String>,
}

impl Attributes {
    /// Creates new empty attributes.
    pub fn new() -> Self {
        Self {
            attrs: IndexMap::new(),
        }
    }

    /// Sets an attribute, keeping the position of an existing key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Removes an attribute and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.attrs.shift_remove(key)
    }

    /// Returns whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Appends a CSS class to the `class` attribute.
    pub fn add_class(&mut self, class: &str) {
        if class.is_empty() {
            return;
        }
        let merged = match self.attrs.get("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set("class", merged);
    }

    /// Renders attributes as an HTML attribute string with a leading space
    /// per attribute, or an empty string.
    pub fn to_html(&self) -> String {
        self.attrs
            .iter()
            .map(|(k, v)| format!(r#" {}="{}""#, html_escape(k), html_escape(v)))
            .collect()
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Returns whether `tag` is safe to splice into markup as an element name.
pub(crate) fn is_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_attributes_render_in_order() {
        let attrs = Attributes::new()
            .with("maxlength", "32")
            .with("placeholder", "Your \"name\"");
        assert_eq!(
            attrs.to_html(),
            r#" maxlength="32" placeholder="Your &quot;name&quot;""#
        );
    }

    #[test]
    fn test_add_class() {
        let mut attrs = Attributes::new();
        attrs.add_class("form-control");
        attrs.add_class("is-invalid");
        assert_eq!(attrs.get("class").map(String::as_str), Some("form-control is-invalid"));
    }

    #[test]
    fn test_tag_names() {
        assert!(is_tag_name("div"));
        assert!(is_tag_name("h3"));
        assert!(!is_tag_name("div onclick=x"));
        assert!(!is_tag_name(""));
    }
}
