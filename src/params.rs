//! Media type parameter lists.
//!
//! A parameter list is the `; name=value` sequence following a media type's
//! base type. Names are case-insensitive and stored lower-cased; values keep
//! their case. Iteration follows insertion order.

use crate::error::{Error, Result};
use crate::grammar::{is_token_byte, quote, unquote};
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// An ordered set of media type parameters.
///
/// # Examples
///
/// ```
/// use tokio_mimetype::ParameterList;
///
/// let params: ParameterList = "; charset=utf-8; title=\"a b\"".parse().unwrap();
/// assert_eq!(params.get("charset"), Some("utf-8"));
/// assert_eq!(params.get("title"), Some("a b"));
/// assert_eq!(params.to_string(), "; charset=utf-8; title=\"a b\"");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterList {
    params: IndexMap<String, String>,
}

impl ParameterList {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `text` into this list, overwriting parameters that already exist.
    ///
    /// `text` starts at the first `;`, optionally preceded by whitespace.
    /// Parameters parsed before an error are kept.
    pub fn parse(&mut self, text: &str) -> Result<()> {
        let bytes = text.as_bytes();
        let len = bytes.len();

        let mut i = skip_whitespace(bytes, 0);
        while i < len && bytes[i] == b';' {
            i = skip_whitespace(bytes, i + 1);
            if i >= len {
                return Ok(());
            }

            let start = i;
            while i < len && is_token_byte(bytes[i]) {
                i += 1;
            }
            let name = text[start..i].to_ascii_lowercase();

            i = skip_whitespace(bytes, i);
            if i >= len || bytes[i] != b'=' {
                return Err(Error::MissingSeparator(name));
            }

            i = skip_whitespace(bytes, i + 1);
            if i >= len {
                return Err(Error::MissingValue(name));
            }

            let value = if bytes[i] == b'"' {
                let open = i;
                i += 1;
                let start = i;
                loop {
                    if i >= len {
                        return Err(Error::UnterminatedQuote(open));
                    }
                    match bytes[i] {
                        b'"' => break,
                        b'\\' => i += 2,
                        _ => i += 1,
                    }
                }
                let value = unquote(&text[start..i]);
                i += 1;
                value
            } else if is_token_byte(bytes[i]) {
                let start = i;
                while i < len && is_token_byte(bytes[i]) {
                    i += 1;
                }
                text[start..i].to_string()
            } else {
                let found = text[i..].chars().next().unwrap_or_default();
                return Err(Error::UnexpectedCharacter { index: i, found });
            };

            self.params.insert(name, value);
            i = skip_whitespace(bytes, i);
        }

        if i < len {
            return Err(Error::TrailingCharacters(i));
        }
        Ok(())
    }

    /// Returns the value of the named parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(&normalize(name)).map(String::as_str)
    }

    /// Sets a parameter, replacing any previous value under the same name.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.params.insert(normalize(name), value.into());
    }

    /// Removes a parameter, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.params.shift_remove(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

impl FromStr for ParameterList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut params = ParameterList::new();
        params.parse(s)?;
        Ok(params)
    }
}

impl fmt::Display for ParameterList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.params {
            write!(f, "; {}={}", name, quote(value))?;
        }
        Ok(())
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for ParameterList {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.set(name.as_ref(), value);
        }
    }
}
