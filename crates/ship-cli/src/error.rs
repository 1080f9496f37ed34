//! Error types for ship-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from ship-config
    #[error(transparent)]
    Config(#[from] ship_config::Error),

    /// Error from ship-render
    #[error(transparent)]
    Render(#[from] ship_render::Error),

    /// Error from ship-deploy
    #[error(transparent)]
    Deploy(#[from] ship_deploy::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
