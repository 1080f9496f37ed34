//! Mapping procedure file paths onto declaration-tree segments
//!
//! A procedure's position in the declaration tree is its path relative to the
//! project root, with the file extension stripped from the last segment:
//! `<root>/admin/create_database.js` becomes `["admin", "create_database"]`.

use std::path::{Component, Path};

use crate::{Error, Result};

/// Convert a procedure file path into ordered declaration-tree segments.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if `path` is not contained within `root`,
/// if the relative path escapes it (`..` components), or if it has no file
/// name.
pub fn to_segments(path: &Path, root: &Path) -> Result<Vec<String>> {
    let invalid = || Error::InvalidPath {
        path: path.display().to_string(),
        root: root.display().to_string(),
    };

    let relative = path.strip_prefix(root).map_err(|_| invalid())?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                segments.push(segment.to_string_lossy().into_owned());
            }
            Component::CurDir => {}
            _ => return Err(invalid()),
        }
    }

    let stem = relative
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(invalid)?;
    let last = segments.last_mut().ok_or_else(invalid)?;
    *last = stem;

    Ok(segments)
}
