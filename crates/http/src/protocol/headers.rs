//! Ordered, case-insensitive header container.
//!
//! Unlike `http::HeaderMap`, [`Headers`] keeps every entry in the exact order it was
//! appended, including repeated keys. Requests and responses each own one, so nothing
//! is shared between connections.

use std::fmt;

/// An ordered list of `(key, value)` header pairs.
///
/// Keys are folded to lowercase when they are appended; values are stored verbatim.
/// Lookups compare keys case-insensitively and return the first match.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Appends a header, keeping any earlier entries with the same key.
    pub fn append(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.entries.push((key.as_ref().to_ascii_lowercase(), value.into()));
    }

    /// Returns the value of the first header named `key`.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        let key = key.as_ref();
        self.entries.iter().find(|(name, _)| name.eq_ignore_ascii_case(key)).map(|(_, value)| value.as_str())
    }

    /// Returns every value stored under `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.iter().filter(move |(name, _)| name.eq_ignore_ascii_case(key)).map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.get(key).is_some()
    }

    /// Removes every header named `key`, returning how many entries were dropped.
    pub fn remove(&mut self, key: impl AsRef<str>) -> usize {
        let key = key.as_ref();
        let before = self.entries.len();
        self.entries.retain(|(name, _)| !name.eq_ignore_ascii_case(key));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (key, value) in iter {
            headers.append(key, value);
        }
        headers
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
