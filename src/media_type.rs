//! Media type parsing, formatting and matching.
//!
//! Implements the `type "/" subtype *(";" parameter)` grammar of RFC 2045.

use crate::error::{Error, Result};
use crate::grammar::is_token;
use crate::params::ParameterList;
use std::fmt;
use std::str::FromStr;

/// A parsed media type such as `text/html; charset=utf-8`.
///
/// Primary and sub types are always valid, lower-cased tokens. A media type
/// loaded from a type map also remembers the file extension it was bound to.
///
/// # Examples
///
/// ```
/// use tokio_mimetype::MediaType;
///
/// let html: MediaType = "Text/HTML; charset=utf-8".parse().unwrap();
/// assert_eq!(html.base_type(), "text/html");
/// assert_eq!(html.parameter("charset"), Some("utf-8"));
///
/// let any_text: MediaType = "text/*".parse().unwrap();
/// assert!(any_text.matches(&html));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    primary_type: String,
    sub_type: String,
    parameters: ParameterList,
    file_extension: String,
}

impl MediaType {
    /// Creates a media type from its parts, with no parameters.
    pub fn new(primary: &str, sub: &str, extension: impl Into<String>) -> Result<Self> {
        if !is_token(primary) {
            return Err(Error::InvalidPrimaryType(primary.to_string()));
        }
        if !is_token(sub) {
            return Err(Error::InvalidSubType(sub.to_string()));
        }
        Ok(Self {
            primary_type: primary.to_ascii_lowercase(),
            sub_type: sub.to_ascii_lowercase(),
            parameters: ParameterList::new(),
            file_extension: extension.into(),
        })
    }

    /// Parses a media type and binds it to a file extension.
    pub fn with_extension(text: &str, extension: impl Into<String>) -> Result<Self> {
        let mut media_type = Self::parse(text)?;
        media_type.file_extension = extension.into();
        Ok(media_type)
    }

    /// Parses a media type with optional parameters.
    ///
    /// The type is split on the first `/`, so `a/b/c` has the sub type `b/c`
    /// and is rejected rather than truncated to `a/b`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingSubType`] if there is no `/` before the first `;`
    /// - [`Error::InvalidPrimaryType`] or [`Error::InvalidSubType`] if either
    ///   half is not a token, including `a/b/c`
    /// - any [`ParameterList::parse`] error from the parameters
    pub fn parse(text: &str) -> Result<Self> {
        let slash = text.find('/');
        let semicolon = text.find(';');

        let (primary, sub, parameters) = match (slash, semicolon) {
            (Some(slash), None) => (&text[..slash], &text[slash + 1..], ParameterList::new()),
            (Some(slash), Some(semicolon)) if slash < semicolon => (
                &text[..slash],
                &text[slash + 1..semicolon],
                text[semicolon..].parse::<ParameterList>()?,
            ),
            _ => return Err(Error::MissingSubType(text.to_string())),
        };

        let primary = primary.trim();
        if !is_token(primary) {
            return Err(Error::InvalidPrimaryType(primary.to_string()));
        }
        let sub = sub.trim();
        if !is_token(sub) {
            return Err(Error::InvalidSubType(sub.to_string()));
        }

        Ok(Self {
            primary_type: primary.to_ascii_lowercase(),
            sub_type: sub.to_ascii_lowercase(),
            parameters,
            file_extension: String::new(),
        })
    }

    /// Returns `primary/sub` without parameters.
    pub fn base_type(&self) -> String {
        format!("{}/{}", self.primary_type, self.sub_type)
    }

    pub fn primary_type(&self) -> &str {
        &self.primary_type
    }

    pub fn sub_type(&self) -> &str {
        &self.sub_type
    }

    /// Replaces the sub type.
    pub fn set_sub_type(&mut self, sub: &str) -> Result<()> {
        if !is_token(sub) {
            return Err(Error::InvalidSubType(sub.to_string()));
        }
        self.sub_type = sub.to_ascii_lowercase();
        Ok(())
    }

    /// The file extension this type was bound to, or `""`.
    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    pub fn parameters(&self) -> &ParameterList {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ParameterList {
        &mut self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name)
    }

    pub fn set_parameter(&mut self, name: &str, value: impl Into<String>) {
        self.parameters.set(name, value);
    }

    pub fn remove_parameter(&mut self, name: &str) -> Option<String> {
        self.parameters.remove(name)
    }

    /// Reports whether two media types name the same content.
    ///
    /// Primary types must be equal. A `*` sub type on either side matches
    /// any sub type; otherwise sub types must be equal. Parameters and
    /// extensions are ignored.
    pub fn matches(&self, other: &MediaType) -> bool {
        self.primary_type == other.primary_type
            && (self.sub_type == "*" || other.sub_type == "*" || self.sub_type == other.sub_type)
    }

    /// Parses `text` and matches against it.
    pub fn matches_str(&self, text: &str) -> Result<bool> {
        Ok(self.matches(&MediaType::parse(text)?))
    }

    /// Formats the type followed by a space and its file extension, the form
    /// used when listing type map entries.
    pub fn to_string_with_extension(&self) -> String {
        format!("{} {}", self, self.file_extension)
    }
}

impl Default for MediaType {
    /// `application/*` with no parameters and no extension.
    fn default() -> Self {
        Self {
            primary_type: "application".to_string(),
            sub_type: "*".to_string(),
            parameters: ParameterList::new(),
            file_extension: String::new(),
        }
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}{}", self.primary_type, self.sub_type, self.parameters)
    }
}
