//! Error handling module for OmniSet
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Unknown module or preset identifiers are never errors: they are dropped
//! silently where they are encountered.

use thiserror::Error;

/// Main error type for OmniSet
#[derive(Error, Debug)]
pub enum OmniSetError {
    /// IO errors (catalog files, theme flag, terminal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network errors while fetching a remote catalog
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Catalog errors (unsupported source, malformed document)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Location/URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for OmniSet operations
pub type Result<T> = std::result::Result<T, OmniSetError>;

// Convenient error constructors
impl OmniSetError {
    /// Create a fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OmniSetError::catalog("missing categories");
        assert_eq!(err.to_string(), "Catalog error: missing categories");

        let err = OmniSetError::fetch("connection refused");
        assert_eq!(err.to_string(), "Fetch error: connection refused");

        let err = OmniSetError::terminal("no tty");
        assert_eq!(err.to_string(), "Terminal error: no tty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: OmniSetError = io_err.into();
        assert!(matches!(err, OmniSetError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: OmniSetError = json_err.into();
        assert!(matches!(err, OmniSetError::Json(_)));
    }

    #[test]
    fn test_url_error_conversion() {
        let err: OmniSetError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, OmniSetError::Url(_)));
    }
}
