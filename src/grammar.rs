//! Token grammar and quoted-string helpers.
//!
//! Based on RFC 1521 and RFC 2045 token definitions.

use std::borrow::Cow;

/// Reports whether the character is in 'tspecials' as defined by RFC 1521 and RFC 2045.
///
/// tspecials := "(" / ")" / "<" / ">" / "@" / "," / ";" / ":" / "\" / <"> / "/" / "[" / "]" / "?" / "="
pub fn is_tspecial(c: char) -> bool {
    matches!(c, '(' | ')' | '<' | '>' | '@' | ',' | ';' | ':' | '\\' | '"' | '/' | '[' | ']' | '?' | '=')
}

/// Reports whether the character is in 'token' as defined by RFC 1521 and RFC 2045.
///
/// token := 1*<any (US-ASCII) CHAR except SPACE, CTLs, or tspecials>
pub fn is_token_char(c: char) -> bool {
    c > '\x20' && c < '\x7f' && !is_tspecial(c)
}

/// Byte form of [`is_token_char`]. Bytes outside ASCII are never token characters.
pub(crate) fn is_token_byte(b: u8) -> bool {
    is_token_char(b as char)
}

/// Reports whether the string is a valid 'token' as defined by RFC 1521 and RFC 2045.
///
/// A token must be non-empty and contain only valid token characters.
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

/// Returns `value` ready to be written as a parameter value.
///
/// Tokens are returned as-is. Anything else is wrapped in double quotes with
/// `\` and `"` escaped by a backslash.
///
/// The empty string is deliberately quoted as `""` even though it contains
/// no non-token characters, so that `name=""` survives being parsed back.
///
/// # Examples
///
/// ```
/// use tokio_mimetype::grammar::quote;
///
/// assert_eq!(quote("utf-8"), "utf-8");
/// assert_eq!(quote("a b"), "\"a b\"");
/// assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
/// assert_eq!(quote(""), "\"\"");
/// ```
pub fn quote(value: &str) -> Cow<'_, str> {
    if is_token(value) {
        return Cow::Borrowed(value);
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Recovers the literal value from the body of a quoted string.
///
/// `body` is the text between the surrounding quotes. A backslash copies the
/// following character literally; an unescaped `"` ends the value.
pub fn unquote(body: &str) -> String {
    let mut value = String::with_capacity(body.len());
    let mut escaped = false;
    for ch in body.chars() {
        if escaped {
            value.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            break;
        } else {
            value.push(ch);
        }
    }
    value
}
