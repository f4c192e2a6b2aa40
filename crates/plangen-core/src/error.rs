//! Error types for the plangen core library
//!
//! This module defines the error handling for the generation pipeline,
//! using thiserror for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for plangen operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing credential, bad endpoint, ...)
    #[error("{message}")]
    Configuration { message: String },

    /// A request field failed validation
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The completion endpoint answered with a non-success status
    #[error("API error ({status_code}): {message}")]
    Api { status_code: u16, message: String },

    /// The completion endpoint did not answer in time
    #[error("Request timed out after {seconds} seconds. Please try again.")]
    Timeout { seconds: u64 },

    /// Transport-level failure talking to the completion endpoint
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The completion response did not have the expected shape
    #[error("Malformed completion response: {message}")]
    MalformedResponse { message: String },

    /// IO errors while reading plans or writing content
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an IO error bound to the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status code carried by this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Whether this error was raised before any side effect took place
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_mentions_status() {
        let err = Error::Api {
            status_code: 401,
            message: "Invalid API Key".to_string(),
        };
        assert_eq!(err.to_string(), "API error (401): Invalid API Key");
        assert_eq!(err.status_code(), Some(401));
    }

    #[test]
    fn timeout_message_is_human_readable() {
        let err = Error::Timeout { seconds: 60 };
        assert!(err.to_string().contains("timed out"));
        assert_eq!(err.status_code(), None);
    }
}
