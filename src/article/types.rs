//! Article type definitions

use std::collections::HashMap;
use std::fmt;

use super::parsing::canonical_header_key;

/// Multi-valued article headers
///
/// Each canonical key maps to every value it was given, in arrival order.
/// Repeated headers are never merged: `X: a` followed by `X: b` keeps both
/// `"a"` and `"b"`. Keys are iterated in the order they first appeared.
///
/// ```
/// use nntp_session::Headers;
///
/// let mut headers = Headers::new();
/// headers.append("x-trace", "a");
/// headers.append("X-Trace", "b");
///
/// assert_eq!(headers.get("X-TRACE"), Some("a"));
/// assert_eq!(headers.get_all("x-trace"), ["a", "b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    values: HashMap<String, Vec<String>>,
    order: Vec<String>,
}

impl Headers {
    /// Create an empty header set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value under `key`, keeping any values already present
    pub fn append(&mut self, key: &str, value: impl Into<String>) {
        let key = canonical_header_key(key);
        match self.values.get_mut(&key) {
            Some(values) => values.push(value.into()),
            None => {
                self.order.push(key.clone());
                self.values.insert(key, vec![value.into()]);
            }
        }
    }

    /// First value for `key` (case-insensitive)
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).first().map(String::as_str)
    }

    /// Every value for `key` (case-insensitive), empty if absent
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values
            .get(&canonical_header_key(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `key` is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(&canonical_header_key(key))
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no header was parsed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys with their values, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order
            .iter()
            .map(|key| (key.as_str(), self.values[key].as_slice()))
    }
}

/// An article fetched with ARTICLE or HEAD
///
/// Owned by the caller; nothing in it refers back to the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    /// Article headers
    pub headers: Headers,
    /// Body lines after the blank separator (empty for HEAD)
    pub body: Vec<String>,
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, values) in self.headers.iter() {
            writeln!(f, "{}: {}", key, values.join(","))?;
        }
        write!(f, "\n{}", self.body.join("\n"))
    }
}
