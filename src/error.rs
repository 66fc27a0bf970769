//! Error types for the region locator.
//!
//! Locating terms on a page never fails for degenerate input (no terms, no
//! fragments, absent anchor): those cases produce "no match". Errors are
//! reserved for invalid configuration and for the I/O around the library.

/// Result type alias for region locator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring or driving the locator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The containment pattern could not be compiled
    #[error("Invalid term pattern: {0}")]
    InvalidPattern(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidPattern(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_error() {
        let err = Error::InvalidConfig("min_cluster_size must be at least 1".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid configuration"));
        assert!(msg.contains("min_cluster_size"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u32>>("[1, 2").unwrap_err();
        let err: Error = json_err.into();
        assert!(format!("{}", err).starts_with("JSON error"));
    }

    #[test]
    fn test_regex_error_conversion() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: Error = regex_err.into();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
