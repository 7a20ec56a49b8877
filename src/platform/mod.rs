//! Host type map discovery.

#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::{MIME_GLOBS, TYPE_FILES};

use crate::error::Result;
use crate::type_map::TypeMap;

/// Loads the host's type map databases into `map`.
///
/// On Unix systems, reads from:
/// - /usr/share/mime/globs2 (FreeDesktop Shared MIME-info Database)
/// - /etc/mime.types, /etc/apache2/mime.types, etc.
///
/// Returns the number of files read.
pub async fn load_system(map: &mut TypeMap) -> Result<usize> {
    #[cfg(unix)]
    {
        unix::load_system_unix(map).await
    }

    #[cfg(not(unix))]
    {
        let _ = map;
        Ok(0)
    }
}
