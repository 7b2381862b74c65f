//! core::version
//!
//! Fallback version lookup from a `VERSION` file.

use std::fs;
use std::io;
use std::path::Path;

use super::assemble::CollectionError;

/// Name of the version file looked up in the collected directory.
pub const VERSION_FILE: &str = "VERSION";

/// Read `<dir>/VERSION`, trimmed of surrounding whitespace.
///
/// A missing file, or one that is blank after trimming, yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`CollectionError::VersionFile`] for any read failure other than
/// the file not existing.
pub fn version_from_file(dir: &Path) -> Result<Option<String>, CollectionError> {
    let path = dir.join(VERSION_FILE);

    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(CollectionError::VersionFile { path, source }),
    };

    let version = String::from_utf8_lossy(&bytes).trim().to_string();
    Ok((!version.is_empty()).then_some(version))
}
