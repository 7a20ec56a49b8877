//! Lookahead tokenizer for type map lines.
//!
//! Splits text on whitespace, returns each configured single character as a
//! token of its own, and returns a double-quoted region as one token with its
//! escapes resolved. Tokens can be pushed back for one-token lookahead.

use crate::error::{Error, Result};
use crate::grammar::unquote;

/// Single-character tokens used for `name=value` pairs.
pub const KEY_VALUE_SINGLES: &[char] = &['='];

/// A tokenizer over a single line of text.
///
/// # Examples
///
/// ```
/// use tokio_mimetype::tokenizer::LineTokenizer;
///
/// let mut tokens = LineTokenizer::new(r#"type = "text/plain; charset=utf-8""#);
/// assert_eq!(tokens.next_token().unwrap(), "type");
/// assert_eq!(tokens.next_token().unwrap(), "=");
/// assert_eq!(tokens.next_token().unwrap(), "text/plain; charset=utf-8");
/// assert!(!tokens.has_more_tokens());
/// ```
#[derive(Debug, Clone)]
pub struct LineTokenizer<'a> {
    text: &'a str,
    position: usize,
    singles: &'a [char],
    pushed: Vec<String>,
}

impl<'a> LineTokenizer<'a> {
    /// Creates a tokenizer that treats `=` as a token of its own.
    pub fn new(text: &'a str) -> Self {
        Self::with_singles(text, KEY_VALUE_SINGLES)
    }

    /// Creates a tokenizer with a custom set of single-character tokens.
    ///
    /// An empty set gives a plain whitespace splitter that still honors quotes.
    pub fn with_singles(text: &'a str, singles: &'a [char]) -> Self {
        Self {
            text,
            position: 0,
            singles,
            pushed: Vec::new(),
        }
    }

    /// Reports whether another call to [`next_token`](Self::next_token) would yield a token.
    pub fn has_more_tokens(&mut self) -> bool {
        if !self.pushed.is_empty() {
            return true;
        }
        self.skip_whitespace();
        self.position < self.text.len()
    }

    /// Returns the next token, or a pushed-back token if there is one.
    pub fn next_token(&mut self) -> Result<String> {
        if let Some(token) = self.pushed.pop() {
            return Ok(token);
        }

        self.skip_whitespace();
        let text = self.text;
        let singles = self.singles;
        let start = self.position;
        let rest = &text[start..];

        let mut chars = rest.char_indices();
        let first = match chars.next() {
            Some((_, c)) => c,
            None => return Err(Error::Exhausted),
        };

        if first == '"' {
            let mut escaped = false;
            for (offset, c) in chars {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    self.position = start + offset + 1;
                    return Ok(unquote(&rest[1..offset]));
                }
            }
            self.position = text.len();
            return Err(Error::UnterminatedQuote(start));
        }

        if singles.contains(&first) {
            self.position = start + first.len_utf8();
            return Ok(first.to_string());
        }

        let end = rest
            .find(|c: char| c.is_whitespace() || singles.contains(&c))
            .unwrap_or(rest.len());
        self.position = start + end;
        Ok(rest[..end].to_string())
    }

    /// Pushes a token back so the next call to [`next_token`](Self::next_token) returns it.
    pub fn push_token(&mut self, token: impl Into<String>) {
        self.pushed.push(token.into());
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.text[self.position..];
        self.position += rest.len() - rest.trim_start().len();
    }
}

impl Iterator for LineTokenizer<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_more_tokens() {
            Some(self.next_token())
        } else {
            None
        }
    }
}
