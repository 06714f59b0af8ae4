//! Error types for the Kontos library.
//!
//! All failures are represented by the [`KontosError`] enum. Validation
//! problems (empty field lists, out-of-range fuzziness) and response shape
//! problems get their own variants so callers can tell a bad query apart
//! from a bad backend.

use std::io;

use thiserror::Error;

/// The main error type for Kontos operations.
#[derive(Error, Debug)]
pub enum KontosError {
    /// An empty or otherwise unusable field list was supplied to the builder.
    #[error("Invalid field list: {0}")]
    InvalidField(String),

    /// Fuzziness outside the supported edit-distance range [0, 2].
    #[error("Invalid fuzziness {0}: must be between 0 and 2")]
    InvalidFuzziness(u32),

    /// The backend response is missing the expected aggregation shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Opaque transport or backend failure while executing a search.
    #[error("Search execution failed: {0}")]
    Execution(String),

    /// Mention store errors (missing file, bad record format).
    #[error("Store error: {0}")]
    Store(String),

    /// CSV export errors.
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration errors.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with KontosError.
pub type Result<T> = std::result::Result<T, KontosError>;

impl KontosError {
    /// Create a new invalid-field error.
    pub fn invalid_field<S: Into<String>>(msg: S) -> Self {
        KontosError::InvalidField(msg.into())
    }

    /// Create a new malformed-response error.
    pub fn malformed_response<S: Into<String>>(msg: S) -> Self {
        KontosError::MalformedResponse(msg.into())
    }

    /// Create a new execution error.
    pub fn execution<S: Into<String>>(msg: S) -> Self {
        KontosError::Execution(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        KontosError::Store(msg.into())
    }

    /// Create a new export error.
    pub fn export<S: Into<String>>(msg: S) -> Self {
        KontosError::Export(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        KontosError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        KontosError::Other(msg.into())
    }
}

impl From<reqwest::Error> for KontosError {
    fn from(err: reqwest::Error) -> Self {
        KontosError::Execution(err.to_string())
    }
}

impl From<csv::Error> for KontosError {
    fn from(err: csv::Error) -> Self {
        KontosError::Export(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = KontosError::invalid_field("target fields must not be empty");
        assert_eq!(
            error.to_string(),
            "Invalid field list: target fields must not be empty"
        );

        let error = KontosError::InvalidFuzziness(3);
        assert_eq!(error.to_string(), "Invalid fuzziness 3: must be between 0 and 2");

        let error = KontosError::malformed_response("missing aggregations");
        assert_eq!(error.to_string(), "Malformed response: missing aggregations");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let kontos_error = KontosError::from(io_error);

        match kontos_error {
            KontosError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let kontos_error = KontosError::from(json_error);

        match kontos_error {
            KontosError::Json(_) => {}
            _ => panic!("Expected JSON error variant"),
        }
    }
}
