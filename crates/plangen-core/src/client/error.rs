//! Normalization of endpoint failures into crate errors

use serde_json::Value;

use crate::error::Error;

/// Build an [`Error::Api`] from a non-success status and its raw body.
///
/// Uses the server's `error.message` when the body carries one, else the raw
/// body text.
pub fn api_error(status_code: u16, body: &str) -> Error {
    Error::Api {
        status_code,
        message: extract_error_message(body),
    }
}

/// Map a transport error, distinguishing timeouts
pub fn transport_error(error: reqwest::Error, timeout_secs: u64) -> Error {
    if error.is_timeout() {
        Error::Timeout {
            seconds: timeout_secs,
        }
    } else {
        Error::Network {
            message: error.to_string(),
            source: Some(error),
        }
    }
}

fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|json| json.get("error"))
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_preferred() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        let err = api_error(401, body);
        assert_eq!(err.to_string(), "API error (401): Invalid API Key");
    }

    #[test]
    fn raw_body_is_used_without_error_object() {
        let err = api_error(502, "Bad Gateway");
        assert_eq!(err.to_string(), "API error (502): Bad Gateway");

        let err = api_error(500, r#"{"detail": "boom"}"#);
        assert_eq!(err.to_string(), r#"API error (500): {"detail": "boom"}"#);
    }
}
