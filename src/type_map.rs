//! File extension to media type maps.
//!
//! A type map is line-oriented text binding file extensions to media types.
//! Two line syntaxes are accepted:
//!
//! ```text
//! # comment
//! type=text/html exts=htm,html
//! text/plain txt text
//! ```
//!
//! A line ending in `\` continues on the next line. Later bindings for an
//! extension replace earlier ones.
//!
//! Parsing already-available text is synchronous ([`TypeMap::parse_str`],
//! [`TypeMap::parse_lines`]); files and streams are read with tokio.

use crate::error::Result;
use crate::media_type::MediaType;
use crate::tokenizer::LineTokenizer;
use bytes::Buf;
use futures::Stream;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tokio_util::io::StreamReader;
use tracing::{debug, trace, warn};

static SHARED: Lazy<RwLock<TypeMap>> = Lazy::new(|| RwLock::new(TypeMap::new()));

/// Returns the process-wide type map, created empty on first use.
///
/// Load into a local [`TypeMap`] and [`merge`](TypeMap::merge) it in, so the
/// lock is not held across I/O.
///
/// # Examples
///
/// ```
/// use tokio_mimetype::type_map::{shared, TypeMap};
///
/// let mut local = TypeMap::new();
/// local.parse_str("application/x-shared-doc sdoc").unwrap();
/// shared().write().unwrap().merge(local);
///
/// assert!(shared().read().unwrap().has_mime_type("sdoc"));
/// ```
pub fn shared() -> &'static RwLock<TypeMap> {
    &SHARED
}

/// A mapping from file extension to [`MediaType`].
///
/// Extensions are stored as written, without case folding.
#[derive(Debug, Clone, Default)]
pub struct TypeMap {
    types: IndexMap<String, MediaType>,
}

impl TypeMap {
    /// Creates an empty type map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses type map text, stopping at the first line that fails.
    ///
    /// Bindings from lines before the failing one are kept. The error carries
    /// the physical line number where the failing entry starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use tokio_mimetype::TypeMap;
    ///
    /// let mut map = TypeMap::new();
    /// map.parse_str("type=text/html exts=htm,html\ntext/plain txt").unwrap();
    /// assert_eq!(map.mime_type_string("htm").as_deref(), Some("text/html"));
    /// assert_eq!(map.mime_type_string("txt").as_deref(), Some("text/plain"));
    /// ```
    pub fn parse_str(&mut self, text: &str) -> Result<()> {
        self.parse_lines(text.lines())
    }

    /// Parses type map text from any synchronous source of physical lines.
    pub fn parse_lines<I>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut joiner = LineJoiner::default();
        for line in lines {
            if let Some((number, entry)) = joiner.push(line.as_ref()) {
                self.parse_numbered(number, &entry)?;
            }
        }
        if let Some((number, entry)) = joiner.finish() {
            self.parse_numbered(number, &entry)?;
        }
        Ok(())
    }

    /// Parses type map text supplied by the caller, logging any failure.
    ///
    /// Intended for best-effort configuration: the error is returned for
    /// inspection but is already reported, so callers may ignore it.
    pub fn set_mime_types(&mut self, text: &str) -> Result<()> {
        self.parse_str(text).map_err(|err| {
            warn!("Failed to parse type map text: {}", err);
            err
        })
    }

    /// Parses one logical line.
    ///
    /// Blank lines and `#` comments are ignored. A line with `=` after its
    /// first character uses the keyed syntax; anything else is positional.
    pub fn parse_entry(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        if line.find('=').map_or(false, |index| index > 0) {
            self.parse_keyed(line)
        } else {
            self.parse_positional(line)
        }
    }

    /// `type=<media type> exts=<ext>,<ext>,...`
    ///
    /// Reading stops at the first name without a value; bindings made
    /// earlier on the same line are kept.
    fn parse_keyed(&mut self, line: &str) -> Result<()> {
        let mut tokens = LineTokenizer::new(line);
        let mut mime_type: Option<String> = None;

        while tokens.has_more_tokens() {
            let name = tokens.next_token()?;
            let value = if tokens.has_more_tokens()
                && tokens.next_token()? == "="
                && tokens.has_more_tokens()
            {
                tokens.next_token()?
            } else {
                debug!("No value for {:?} in type map line {:?}, skipping the rest", name, line);
                return Ok(());
            };

            match name.as_str() {
                "type" => mime_type = Some(value),
                "exts" => {
                    for ext in value.split(',').filter(|ext| !ext.is_empty()) {
                        let media_type = match &mime_type {
                            Some(text) => MediaType::with_extension(text, ext)?,
                            None => MediaType::default(),
                        };
                        self.insert(ext, media_type);
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// `<media type> <ext> <ext> ...`
    fn parse_positional(&mut self, line: &str) -> Result<()> {
        let mut tokens = LineTokenizer::with_singles(line, &[]);
        if !tokens.has_more_tokens() {
            return Ok(());
        }

        let mime_type = tokens.next_token()?;
        for ext in tokens {
            let ext = ext?;
            let media_type = MediaType::with_extension(&mime_type, ext.as_str())?;
            self.insert(&ext, media_type);
        }
        Ok(())
    }

    fn parse_numbered(&mut self, number: usize, entry: &str) -> Result<()> {
        self.parse_entry(entry).map_err(|err| err.at_line(number))
    }

    /// Binds `extension` to `media_type`, replacing any previous binding.
    pub fn insert(&mut self, extension: &str, media_type: MediaType) -> Option<MediaType> {
        trace!("Binding extension {:?} to {}", extension, media_type.base_type());
        self.types.insert(extension.to_string(), media_type)
    }

    /// Loads a type map file.
    ///
    /// Failing to open or read the file, or to parse one of its lines,
    /// is returned as the result of the load.
    pub async fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path).await?;
        debug!("Loading type map from {}", path.display());
        self.load_reader(BufReader::new(file)).await
    }

    /// Loads type map text from an async buffered reader.
    pub async fn load_reader<R>(&mut self, reader: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut joiner = LineJoiner::default();
        while let Some(line) = lines.next_line().await? {
            if let Some((number, entry)) = joiner.push(&line) {
                self.parse_numbered(number, &entry)?;
            }
        }
        if let Some((number, entry)) = joiner.finish() {
            self.parse_numbered(number, &entry)?;
        }
        Ok(())
    }

    /// Loads type map text from a stream of byte chunks, such as a network body.
    pub async fn load_stream<S, B, E>(&mut self, stream: S) -> Result<()>
    where
        S: Stream<Item = std::result::Result<B, E>> + Unpin,
        B: Buf + Unpin,
        E: Into<io::Error>,
    {
        self.load_reader(StreamReader::new(stream)).await
    }

    /// Loads a type map file on the tokio runtime.
    ///
    /// The returned handle resolves once the whole file has been read, with
    /// either the loaded map or the error that stopped it.
    pub fn spawn_load(path: impl Into<PathBuf>) -> JoinHandle<Result<TypeMap>> {
        let path = path.into();
        tokio::spawn(async move {
            let mut map = TypeMap::new();
            map.load(&path).await?;
            Ok(map)
        })
    }

    /// Loads the host's type map databases.
    ///
    /// Returns how many files were read. Missing files are skipped.
    pub async fn load_system(&mut self) -> Result<usize> {
        crate::platform::load_system(self).await
    }

    /// Moves every binding of `other` into this map, replacing existing ones.
    pub fn merge(&mut self, other: TypeMap) {
        self.types.extend(other.types);
    }

    pub fn mime_type(&self, extension: &str) -> Option<&MediaType> {
        self.types.get(extension)
    }

    pub fn has_mime_type(&self, extension: &str) -> bool {
        self.types.contains_key(extension)
    }

    /// Returns the base type (`primary/sub`) bound to `extension`.
    pub fn mime_type_string(&self, extension: &str) -> Option<String> {
        self.mime_type(extension).map(MediaType::base_type)
    }

    /// Looks up the media type for a path's extension, exactly and then lower-cased.
    pub fn mime_type_for_path(&self, path: impl AsRef<Path>) -> Option<&MediaType> {
        let ext = path.as_ref().extension()?.to_str()?;
        self.mime_type(ext)
            .or_else(|| self.mime_type(&ext.to_lowercase()))
    }

    /// Extensions in the order they were first bound.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn mime_types(&self) -> impl Iterator<Item = &MediaType> {
        self.types.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MediaType)> {
        self.types.iter().map(|(ext, mt)| (ext.as_str(), mt))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Extend<(String, MediaType)> for TypeMap {
    fn extend<T: IntoIterator<Item = (String, MediaType)>>(&mut self, iter: T) {
        self.types.extend(iter);
    }
}

/// Joins physical lines ending in `\` into logical lines.
///
/// Yields each logical line with the 1-based number of its first physical line.
#[derive(Debug, Default)]
struct LineJoiner {
    pending: Option<(usize, String)>,
    count: usize,
}

impl LineJoiner {
    fn push(&mut self, line: &str) -> Option<(usize, String)> {
        self.count += 1;
        let (number, mut entry) = self
            .pending
            .take()
            .unwrap_or_else(|| (self.count, String::new()));
        entry.push_str(line);

        if entry.ends_with('\\') {
            entry.pop();
            self.pending = Some((number, entry));
            None
        } else {
            Some((number, entry))
        }
    }

    fn finish(&mut self) -> Option<(usize, String)> {
        self.pending.take()
    }
}
