//! The ordered multi-map produced by the encoder.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::map::{self, Map};
use crate::ser::encode::encode_into;

/// A multi-map from query keys to their values.
///
/// Values under the same key keep the order they were added in. The order
/// of distinct keys is unspecified; [`encode`](Self::encode) sorts them,
/// which makes the encoded form canonical.
///
/// ```
/// use query_values::QueryValues;
///
/// let mut values = QueryValues::new();
/// values.add("token", "x y");
/// values.add("index", "1");
/// values.add("index", "2");
/// assert_eq!(values.encode(), "index=1&index=2&token=x+y");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryValues {
    inner: Map<String, Vec<String>>,
}

impl QueryValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an already-encoded query string, such as `?a=1&a=2&b=`.
    ///
    /// A single leading `?` is ignored.
    pub fn parse(query: &str) -> Result<Self> {
        crate::parse::parse(query.as_bytes())
    }

    /// Appends `value` to the values of `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// Replaces all values of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), vec![value.into()]);
    }

    /// The first value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of `key`, empty if the key is absent.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        map::remove(&mut self.inner, key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Encodes the values as `key=value` pairs sorted by key, using form
    /// encoding.
    pub fn encode(&self) -> String {
        self.encode_with(true)
    }

    /// Encodes the values as `key=value` pairs sorted by key.
    ///
    /// See [`Config::use_form_encoding`](crate::Config::use_form_encoding)
    /// for the two encoding modes.
    pub fn encode_with(&self, use_form_encoding: bool) -> String {
        let mut entries: Vec<_> = self.inner.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut buffer = Vec::with_capacity(128);
        for (key, values) in entries {
            for value in values {
                if !buffer.is_empty() {
                    buffer.push(b'&');
                }
                encode_into(&mut buffer, key, use_form_encoding);
                buffer.push(b'=');
                encode_into(&mut buffer, value, use_form_encoding);
            }
        }
        // percent-encoding only ever emits ASCII or the input's own UTF-8
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl fmt::Display for QueryValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for QueryValues {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryValues {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        values.extend(iter);
        values
    }
}

impl IntoIterator for QueryValues {
    type Item = (String, Vec<String>);
    type IntoIter = <Map<String, Vec<String>> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
