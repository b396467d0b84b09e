//! Request payload consumed by submission detection.

use indexmap::IndexMap;

/// Method a form is submitted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Values travel in the query string.
    Get,
    /// Values travel in the request body.
    Post,
}

impl Method {
    /// Parses a method name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        [Self::Get, Self::Post]
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
    }

    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostedValue {
    /// The key appeared once.
    Single(String),
    /// The key appeared several times, in order.
    Multiple(Vec<String>),
}

impl PostedValue {
    /// Returns the last submitted value.
    pub fn last(&self) -> &str {
        match self {
            Self::Single(v) => v,
            Self::Multiple(vs) => vs.last().map_or("", String::as_str),
        }
    }

    /// Returns every submitted value.
    pub fn all(&self) -> Vec<String> {
        match self {
            Self::Single(v) => vec![v.clone()],
            Self::Multiple(vs) => vs.clone(),
        }
    }
}

/// Ordered parameter bag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    params: IndexMap<String, PostedValue>,
}

impl Params {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value; repeated keys accumulate.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.params.get_mut(&key) {
            None => {
                self.params.insert(key, PostedValue::Single(value));
            }
            Some(PostedValue::Multiple(values)) => values.push(value),
            Some(existing) => {
                let first = existing.last().to_string();
                *existing = PostedValue::Multiple(vec![first, value]);
            }
        }
    }

    /// Gets a parameter.
    pub fn get(&self, key: &str) -> Option<&PostedValue> {
        self.params.get(key)
    }

    /// Returns whether a key was submitted.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parses an `application/x-www-form-urlencoded` string.
    pub fn from_urlencoded(input: &str) -> Self {
        let mut params = Self::new();
        for pair in input.split('&').filter(|p| !p.is_empty()) {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let value = parts.next().unwrap_or("");
            params.insert(urlencoding_decode(key), urlencoding_decode(value));
        }
        params
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// The parts of an incoming request a form looks at.
#[derive(Debug, Clone)]
pub struct FormRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path, used as the default form action.
    pub path: String,
    /// Query string parameters.
    pub query: Params,
    /// Decoded body parameters.
    pub body: Params,
}

impl FormRequest {
    /// Creates a new request.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Params::new(),
            body: Params::new(),
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Sets a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Sets a body parameter.
    #[must_use]
    pub fn body_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.insert(key, value);
        self
    }

    /// Replaces the body with a url-encoded payload.
    #[must_use]
    pub fn urlencoded_body(mut self, body: &str) -> Self {
        self.body = Params::from_urlencoded(body);
        self
    }

    /// Returns the parameter bag a form with `method` reads from.
    pub fn params_for(&self, method: Method) -> &Params {
        match method {
            Method::Get => &self.query,
            Method::Post => &self.body,
        }
    }
}

/// URL decoding of `%XX` escapes and `+`.
fn urlencoding_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                {
                    Some(byte) => {
                        out.push(byte);
                        i += 2;
                    }
                    None => out.push(b'%'),
                }
            }
            other => out.push(other),
        }
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!(Method::parse("GET"), Some(Method::Get));
        assert_eq!(Method::parse("post"), Some(Method::Post));
        assert_eq!(Method::parse("PUT"), None);
        assert_eq!(Method::Get.to_string(), "GET");
    }

    #[test]
    fn test_repeated_keys_accumulate() {
        let params: Params = [("tags", "a"), ("tags", "b"), ("tags", "c"), ("name", "x")]
            .into_iter()
            .collect();
        assert_eq!(
            params.get("tags"),
            Some(&PostedValue::Multiple(vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string()
            ]))
        );
        assert_eq!(params.get("name"), Some(&PostedValue::Single("x".to_string())));
        assert_eq!(params.get("tags").map(PostedValue::last), Some("c"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_urlencoded_parsing() {
        let params = Params::from_urlencoded("name=John+Doe&city=New%20York&greet=gr%C3%BC%C3%9F&pct=100%");
        assert_eq!(params.get("name").map(PostedValue::last), Some("John Doe"));
        assert_eq!(params.get("city").map(PostedValue::last), Some("New York"));
        assert_eq!(params.get("greet").map(PostedValue::last), Some("grüß"));
        assert_eq!(params.get("pct").map(PostedValue::last), Some("100%"));
    }

    #[test]
    fn test_params_for_method() {
        let req = FormRequest::post("/login")
            .query_param("page", "1")
            .body_param("username", "alice");
        assert!(req.params_for(Method::Post).contains("username"));
        assert!(!req.params_for(Method::Post).contains("page"));
        assert!(req.params_for(Method::Get).contains("page"));
    }
}
