//! MIME media type parsing and extension type maps with async-first loading.
//!
//! This crate provides:
//! - Media type parsing, formatting and wildcard matching (RFC 2045)
//! - Ordered parameter lists with quoted-string handling
//! - A lookahead tokenizer for `name=value` configuration lines
//! - Type maps binding file extensions to media types, loaded from text,
//!   files, byte streams or the host's `mime.types` databases
//!
//! File and stream I/O is async-first using tokio; parsing text that is
//! already in memory is synchronous.
//!
//! # Examples
//!
//! ```
//! use tokio_mimetype::{MediaType, TypeMap};
//!
//! let mut map = TypeMap::new();
//! map.parse_str("# web\ntype=text/html exts=htm,html\nimage/png png").unwrap();
//!
//! let html = map.mime_type("html").unwrap();
//! assert!(html.matches(&"text/*".parse::<MediaType>().unwrap()));
//! ```

pub mod error;
pub mod grammar;
pub mod tokenizer;
pub mod params;
pub mod media_type;
pub mod type_map;
pub mod platform;

// Re-export commonly used types
pub use error::{Error, Result};
pub use tokenizer::LineTokenizer;
pub use params::ParameterList;
pub use media_type::MediaType;
pub use type_map::{shared, TypeMap};
