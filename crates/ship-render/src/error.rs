//! Error types for ship-render

/// Result type for ship-render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating or rendering one procedure.
///
/// All variants are fatal for the procedure they name only; the caller
/// reports them and keeps processing other procedures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "Missing required configuration fields for procedure `{procedure}`: {}",
        fields.join(", ")
    )]
    MissingRequiredKeys {
        procedure: String,
        fields: Vec<String>,
    },

    #[error(
        "Unsupported language `{language}` for procedure `{procedure}` \
         (supported: javascript, python)"
    )]
    UnsupportedLanguage {
        procedure: String,
        language: String,
    },

    #[error(
        "Invalid execute_as value `{value}` for procedure `{procedure}` \
         (valid: owner, caller)"
    )]
    InvalidExecuteAs { procedure: String, value: String },

    #[error("Invalid value for `{key}` in procedure `{procedure}`: {reason}")]
    InvalidValue {
        procedure: String,
        key: String,
        reason: String,
    },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}
