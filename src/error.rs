//! Error types for post storage
//!
//! The store reports three kinds of failure. The content service maps
//! each kind onto a response status; see `service::ApiError`.

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, BlogError>;

/// Errors surfaced by the post store
#[derive(Debug, Error)]
pub enum BlogError {
    /// Required input was missing or empty
    #[error("{0}")]
    Validation(String),

    /// No record exists for the given slug
    #[error("Post not found: {0}")]
    NotFound(String),

    /// Reading or writing the backing files failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BlogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        BlogError::Validation(msg.into())
    }

    pub fn not_found(slug: impl Into<String>) -> Self {
        BlogError::NotFound(slug.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        BlogError::Storage(msg.into())
    }
}

impl From<std::io::Error> for BlogError {
    fn from(err: std::io::Error) -> Self {
        BlogError::Storage(err.to_string())
    }
}

impl From<serde_yaml::Error> for BlogError {
    fn from(err: serde_yaml::Error) -> Self {
        BlogError::Storage(format!("invalid front-matter: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: BlogError = io.into();
        assert!(matches!(err, BlogError::Storage(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_not_found_message() {
        let err = BlogError::not_found("hello-world-1234abcd");
        assert_eq!(err.to_string(), "Post not found: hello-world-1234abcd");
    }
}
