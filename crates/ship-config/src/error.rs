//! Error types for ship-config

/// Result type for ship-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading declarations or preparing a procedure
/// for resolution.
///
/// A `MalformedDeclaration` is fatal for the whole run (the declaration file
/// is shared by every procedure); the other variants are fatal only for the
/// procedure they were raised for. The resolution engine itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed declaration: {message}")]
    MalformedDeclaration { message: String },

    #[error("Procedure path `{path}` is not inside the project root `{root}`")]
    InvalidPath { path: String, root: String },

    #[error("Malformed frontmatter: {message}")]
    MalformedFrontmatter { message: String },
}

impl Error {
    pub fn declaration(message: impl Into<String>) -> Self {
        Self::MalformedDeclaration {
            message: message.into(),
        }
    }

    pub fn frontmatter(message: impl Into<String>) -> Self {
        Self::MalformedFrontmatter {
            message: message.into(),
        }
    }
}
