//! Error types and handling for the CLI
//!
//! Everything that can stop a run ends up here so `main` can print one
//! message and pick an exit status.

use plangen_core::client::auth::missing_key_help;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Terminal or file IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the generation pipeline
    #[error("{0}")]
    Core(#[from] plangen_core::Error),

    /// Configuration file could not be found
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API credential missing from the environment
    #[error("{var} not found in environment variables")]
    ApiKeyMissing { var: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    ///
    /// Every failure maps to 1; cancellation is not an error.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Remediation steps to print after the message, if any apply
    pub fn help(&self) -> Option<String> {
        match self {
            Self::ApiKeyMissing { var } => Some(missing_key_help(var)),
            _ => None,
        }
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    let mut text = if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    };

    if let Some(help) = error.help() {
        text.push_str("\n\n");
        text.push_str(&help);
    }
    text
}
