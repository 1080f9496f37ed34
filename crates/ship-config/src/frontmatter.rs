//! Frontmatter extraction for procedure source files
//!
//! A procedure file may open with a block comment holding per-file overrides
//! as a YAML mapping:
//!
//! ```text
//! /*
//! comment: Drops a database
//! execute_as: caller
//! */
//! var result = ...
//! ```
//!
//! The block must be the first non-whitespace content of the file. Everything
//! after the closing marker is the procedure body.

use serde_json::Value;

use crate::resolve::Overrides;
use crate::{Error, Result};

/// Opening marker of a frontmatter block.
pub const FRONTMATTER_OPEN: &str = "/*";
/// Closing marker of a frontmatter block.
pub const FRONTMATTER_CLOSE: &str = "*/";

/// Split a procedure source into inline overrides and the remaining body.
///
/// Sources without a leading frontmatter block return empty overrides and
/// the source untouched.
///
/// # Errors
///
/// Returns [`Error::MalformedFrontmatter`] if an opening marker has no
/// matching closing marker, or if the enclosed content is not a YAML mapping.
pub fn extract(source: &str) -> Result<(Overrides, &str)> {
    let trimmed = source.trim_start();
    if !trimmed.starts_with(FRONTMATTER_OPEN) {
        return Ok((Overrides::new(), source));
    }

    let after_open = &trimmed[FRONTMATTER_OPEN.len()..];
    let Some(close) = after_open.find(FRONTMATTER_CLOSE) else {
        return Err(Error::frontmatter(format!(
            "opening `{FRONTMATTER_OPEN}` has no matching `{FRONTMATTER_CLOSE}`"
        )));
    };

    let block = &after_open[..close];
    let body = &after_open[close + FRONTMATTER_CLOSE.len()..];
    let body = body.strip_prefix('\n').unwrap_or(body);

    Ok((parse_block(block)?, body))
}

fn parse_block(block: &str) -> Result<Overrides> {
    if block.trim().is_empty() {
        return Ok(Overrides::new());
    }

    let value: Value = serde_yaml::from_str(block)
        .map_err(|e| Error::frontmatter(format!("not a valid YAML block: {e}")))?;
    match value {
        Value::Object(mapping) => Ok(mapping),
        Value::Null => Ok(Overrides::new()),
        _ => Err(Error::frontmatter(
            "frontmatter must be a mapping of keys to values",
        )),
    }
}
