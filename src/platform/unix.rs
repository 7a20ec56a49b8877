//! Unix-specific type map loading.
//!
//! Implements loading from:
//! - FreeDesktop Shared MIME-info Database (globs2 format)
//! - Traditional mime.types files

use crate::error::Result;
use crate::media_type::MediaType;
use crate::type_map::TypeMap;
use std::collections::HashSet;
use std::io;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// Paths to FreeDesktop Shared MIME-info Database globs2 files.
pub const MIME_GLOBS: &[&str] = &[
    "/usr/local/share/mime/globs2",
    "/usr/share/mime/globs2",
];

/// Common locations for mime.types files on Unix.
pub const TYPE_FILES: &[&str] = &[
    "/etc/mime.types",
    "/etc/apache2/mime.types",
    "/etc/apache/mime.types",
    "/etc/httpd/conf/mime.types",
];

pub(super) async fn load_system_unix(map: &mut TypeMap) -> Result<usize> {
    // The shared-mime-info database supersedes mime.types when present.
    for filename in MIME_GLOBS {
        match File::open(filename).await {
            Ok(file) => {
                load_globs(map, BufReader::new(file)).await?;
                debug!("Loaded MIME globs from {}", filename);
                return Ok(1);
            }
            Err(err) => debug!("Skipping {}: {}", filename, err),
        }
    }

    let mut loaded = 0;
    for filename in TYPE_FILES {
        match map.load(filename).await {
            Ok(()) => loaded += 1,
            Err(crate::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                debug!("Skipping {}: not found", filename);
            }
            Err(err) => warn!("Failed to load {}: {}", filename, err),
        }
    }
    Ok(loaded)
}

/// Load bindings from a globs2 file.
///
/// Format: `weight:mimetype:glob[:morefields...]`
/// Example: `50:text/plain:*.txt`
///
/// Entries are sorted by descending weight, so within one file the first
/// binding seen for an extension is kept. Bindings already in `map` are
/// replaced. Globs other than `*.ext` are ignored.
///
/// See https://specifications.freedesktop.org/shared-mime-info-spec/shared-mime-info-spec-0.21.html
async fn load_globs<R>(map: &mut TypeMap, reader: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let fields: Vec<&str> = line.split(':').collect();

        if fields.len() < 3 || fields[0].is_empty() || fields[0].starts_with('#') {
            continue;
        }

        let extension = match fields[2].strip_prefix("*.") {
            Some(ext) if !ext.is_empty() && !ext.contains(&['?', '*', '['][..]) => ext,
            _ => continue,
        };

        if seen.contains(extension) {
            continue;
        }

        match MediaType::with_extension(fields[1], extension) {
            Ok(media_type) => {
                seen.insert(extension.to_string());
                map.insert(extension, media_type);
            }
            Err(err) => debug!("Ignoring glob {:?}: {}", line, err),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_globs() {
        let data = "# comment line\n\
                    50:text/plain:*.txt\n\
                    40:text/x-readme:*.txt\n\
                    50:image/png:*.png:cs\n\
                    50:text/x-makefile:Makefile\n\
                    50:application/x-wild:*.[ch]\n\
                    50:not a type:*.bad\n";
        let mut map = TypeMap::new();
        load_globs(&mut map, data.as_bytes()).await.unwrap();

        assert_eq!(map.mime_type_string("txt").as_deref(), Some("text/plain"));
        assert_eq!(map.mime_type_string("png").as_deref(), Some("image/png"));
        assert_eq!(map.len(), 2);
    }

    #[tokio::test]
    async fn test_load_globs_replaces_earlier_bindings() {
        let mut map = TypeMap::new();
        map.parse_str("text/x-old txt\nimage/x-keep kep").unwrap();

        let data = "50:text/plain:*.txt\n40:text/x-lower:*.txt\n";
        load_globs(&mut map, data.as_bytes()).await.unwrap();

        assert_eq!(map.mime_type_string("txt").as_deref(), Some("text/plain"));
        assert_eq!(map.mime_type_string("kep").as_deref(), Some("image/x-keep"));
    }

    #[tokio::test]
    async fn test_load_system_unix() {
        // Should complete without error whatever the host provides.
        let mut map = TypeMap::new();
        assert!(load_system_unix(&mut map).await.is_ok());
    }
}
