use thiserror::Error;

/// Unified error type for git-tag-action operations
#[derive(Error, Debug)]
pub enum TagActionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-tag-action
pub type Result<T> = std::result::Result<T, TagActionError>;

impl TagActionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagActionError::Config(msg.into())
    }

    /// Create a not-found error with context
    pub fn not_found(msg: impl Into<String>) -> Self {
        TagActionError::NotFound(msg.into())
    }

    /// Create an API error from a response status and body
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        TagActionError::Api {
            status,
            message: msg.into(),
        }
    }

    /// Whether this error means the requested object does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, TagActionError::NotFound(_))
    }

    /// Whether this error was raised before any network call was made
    pub fn is_config(&self) -> bool {
        matches!(self, TagActionError::Config(_))
    }
}
