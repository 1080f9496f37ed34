//! The declaration tree: hierarchical procedure defaults parsed once per run
//!
//! The declaration document mirrors the directory layout of the procedure
//! sources. At every level, keys carrying the `+` prefix declare cascading
//! defaults that apply to everything below that level; unprefixed keys either
//! open a deeper level or declare values for the procedure whose path ends
//! exactly there:
//!
//! ```yaml
//! "+database": default_db
//! admin:
//!   "+database": admin_db
//!   create_database:
//!     returns: varchar
//! ```
//!
//! The tree is built in a single validated pass and is immutable afterwards;
//! lookups never re-inspect prefixes.

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::{Error, Result};

/// Prefix marking a key as a cascading default.
pub const CASCADE_PREFIX: char = '+';

/// One level of the declaration tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    /// Defaults visible to every procedure at or below this level,
    /// declared with the `+` prefix (stored stripped).
    cascading: Map<String, Value>,

    /// Values that apply only to a procedure whose path ends exactly here.
    exact: Map<String, Value>,

    /// Deeper levels, keyed by path segment.
    children: HashMap<String, Node>,
}

impl Node {
    /// Build a node from one level of the parsed declaration document.
    ///
    /// Keys are partitioned by the `+` prefix. An unprefixed mapping value is
    /// loaded recursively as a child and also retained verbatim in `exact`:
    /// the terminal node of a procedure path contributes its entire mapping
    /// to that procedure, structured values such as `args` or `grant_usage`
    /// included.
    fn from_mapping(mapping: &Map<String, Value>, path: &str) -> Result<Self> {
        let mut node = Self::default();

        for (key, value) in mapping {
            if let Some(stripped) = key.strip_prefix(CASCADE_PREFIX) {
                if stripped.is_empty() {
                    return Err(Error::declaration(format!(
                        "bare `+` key at `{}`",
                        display_level(path)
                    )));
                }
                if mapping.contains_key(stripped) {
                    return Err(Error::declaration(format!(
                        "`{stripped}` is declared both with and without the `+` prefix at `{}`",
                        display_level(path)
                    )));
                }
                node.cascading.insert(stripped.to_string(), value.clone());
            } else {
                if let Value::Object(child) = value {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}/{key}")
                    };
                    node.children
                        .insert(key.clone(), Self::from_mapping(child, &child_path)?);
                }
                node.exact.insert(key.clone(), value.clone());
            }
        }

        Ok(node)
    }

    /// Cascading defaults declared at this level, prefix stripped.
    pub fn cascading(&self) -> &Map<String, Value> {
        &self.cascading
    }

    /// Values that apply only to a procedure ending exactly at this node.
    pub fn exact(&self) -> &Map<String, Value> {
        &self.exact
    }

    /// The child node for a path segment, if declared.
    pub fn child(&self, segment: &str) -> Option<&Node> {
        self.children.get(segment)
    }

    /// Number of declared child levels.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// The fully-loaded declaration tree, parsed once per run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationTree {
    root: Node,
}

impl DeclarationTree {
    /// Parse a declaration document from YAML source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDeclaration`] if the source is not valid
    /// YAML, the top level is not a mapping, or any level declares the same
    /// key both with and without the `+` prefix.
    pub fn parse(source: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(source)
            .map_err(|e| Error::declaration(format!("not a valid YAML document: {e}")))?;
        Self::from_value(&value)
    }

    /// Build a tree from an already-parsed document value.
    ///
    /// `Null` (an empty or absent declaration section) yields an empty tree.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(mapping) => Ok(Self {
                root: Node::from_mapping(mapping, "")?,
            }),
            other => Err(Error::declaration(format!(
                "top level must be a mapping, got {}",
                value_kind(other)
            ))),
        }
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The node at an exact path, if every segment is declared.
    pub fn node_at<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Node> {
        let mut node = &self.root;
        for segment in segments {
            node = node.child(segment.as_ref())?;
        }
        Some(node)
    }
}

fn display_level(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
