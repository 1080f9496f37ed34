//! Error types for ship-deploy

/// Result type for ship-deploy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while sequencing deployment statements.
#[derive(Debug, thiserror::Error)]
#[allow(dead_code)] // Execution variant will be constructed by live-transport executors
pub enum Error {
    #[error("Failed to execute statement: {message}")]
    Execution { message: String },
}

impl Error {
    /// Create a new execution error with the given message
    #[allow(dead_code)] // Will be used by live-transport executors
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }
}
