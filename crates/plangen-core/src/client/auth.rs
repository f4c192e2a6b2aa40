//! Credential handling for the completion endpoint
//!
//! The credential is read from a process environment variable once, before
//! any network activity, and applied as a bearer token.

use std::fmt;

use crate::error::{Error, Result};

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

/// An API credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap an explicit key; blank keys are rejected
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(Error::configuration("API key is empty"));
        }
        Ok(Self(key))
    }

    /// Read the key from the named environment variable
    pub fn from_env(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Self::new(value),
            _ => Err(Error::configuration(format!(
                "{} not found in environment variables",
                var
            ))),
        }
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Remediation printed when the credential is missing
pub fn missing_key_help(var: &str) -> String {
    format!(
        "To set up:\n\
         1. Create a .env file in the project root\n\
         2. Add: {var}=your_api_key_here\n\
         3. Get your API key from: https://console.groq.com/keys"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_uses_key() {
        let key = ApiKey::new("gsk-test-123").unwrap();
        assert_eq!(key.bearer(), "Bearer gsk-test-123");
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = ApiKey::new("gsk-secret").unwrap();
        assert!(!format!("{:?}", key).contains("gsk-secret"));
    }

    #[test]
    fn missing_env_var_is_a_configuration_error() {
        let err = ApiKey::from_env("PLANGEN_TEST_KEY_THAT_IS_NEVER_SET").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("PLANGEN_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn blank_key_is_rejected() {
        assert!(ApiKey::new("   ").is_err());
    }
}
