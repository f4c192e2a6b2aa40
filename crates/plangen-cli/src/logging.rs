//! Logging setup for the plangen CLI
//!
//! This module provides:
//! - Verbosity and environment driven subscriber configuration
//! - A per-session request ID attached to operation spans
//! - Credential redaction for anything echoed back to the operator
//! - Operation timers
//!
//! All log output goes to stderr (and optionally a file) so it never mixes
//! with prompts or generated content on stdout.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{field, Span};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry};
use uuid::Uuid;

/// Global request ID for the current session
static REQUEST_ID: OnceLock<String> = OnceLock::new();

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Output format: compact, full, json
    pub format: LogFormat,
    /// Use ANSI colors on stderr when it is a terminal
    pub ansi: bool,
    /// Optional file output path
    pub file: Option<PathBuf>,
    /// Include thread IDs
    pub thread_ids: bool,
    /// Include file and line numbers
    pub source_location: bool,
    /// Emit span close events with timings
    pub span_events: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// Full format with all details
    Full,
    /// JSON structured format
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            ansi: true,
            file: None,
            thread_ids: false,
            source_location: false,
            span_events: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();

        match verbosity {
            0 => {}
            1 => {
                config.level = "info".to_string();
            }
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.format = LogFormat::Full;
                config.source_location = true;
                config.thread_ids = true;
                config.span_events = true;
            }
        }

        config
    }

    /// Apply `RUST_LOG`, `PLANGEN_LOG_FORMAT` and `PLANGEN_LOG_FILE`
    pub fn merge_with_env(&mut self) {
        self.merge_with(|name| std::env::var(name).ok());
    }

    fn merge_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(rust_log) = lookup("RUST_LOG") {
            self.level = rust_log;
        }

        if let Some(format) = lookup("PLANGEN_LOG_FORMAT") {
            match format.to_lowercase().as_str() {
                "compact" => self.format = LogFormat::Compact,
                "full" => self.format = LogFormat::Full,
                "json" => self.format = LogFormat::Json,
                // the subscriber is not up yet, so this goes straight to stderr
                _ => eprintln!("Invalid PLANGEN_LOG_FORMAT '{}', using default", format),
            }
        }

        if let Some(file) = lookup("PLANGEN_LOG_FILE") {
            if !file.trim().is_empty() {
                self.file = Some(PathBuf::from(file));
            }
        }
    }
}

/// Initialize the global logging system
///
/// The returned guard flushes the file writer when dropped and must be held
/// for the life of the process.
pub fn init_logging(config: LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::other(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let mut layers: Vec<BoxedLayer> = vec![console_layer(&config)];
    let mut guard = None;

    if let Some(path) = &config.file {
        let (layer, file_guard) = file_layer(path, &config)?;
        layers.push(layer);
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;

    let request_id = REQUEST_ID.get_or_init(generate_request_id);
    tracing::debug!(
        request_id = %request_id,
        level = %config.level,
        format = ?config.format,
        "Logging system initialized"
    );

    Ok(guard)
}

fn span_events(config: &LoggingConfig) -> FmtSpan {
    if config.span_events {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

fn console_layer(config: &LoggingConfig) -> BoxedLayer {
    let ansi = config.ansi && std::io::stderr().is_terminal();
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(config.thread_ids)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_span_events(span_events(config));

    match config.format {
        LogFormat::Compact => layer.with_ansi(ansi).compact().boxed(),
        LogFormat::Full => layer.with_ansi(ansi).boxed(),
        LogFormat::Json => layer.with_ansi(false).json().boxed(),
    }
}

fn file_layer(path: &std::path::Path, config: &LoggingConfig) -> Result<(BoxedLayer, WorkerGuard)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::config(format!("Invalid log file path: {}", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(config.thread_ids)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_span_events(span_events(config));

    let layer = match config.format {
        LogFormat::Json => layer.json().boxed(),
        _ => layer.boxed(),
    };
    Ok((layer, guard))
}

/// Generate a unique request ID for this session
pub fn generate_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

/// Get the current request ID
pub fn current_request_id() -> Option<&'static str> {
    REQUEST_ID.get().map(|s| s.as_str())
}

/// Create a span tagged with the session's request ID
pub fn create_operation_span(operation: &str, details: Option<&str>) -> Span {
    tracing::info_span!(
        "operation",
        operation = operation,
        request_id = current_request_id().unwrap_or("unknown"),
        details = details.unwrap_or(""),
        duration_ms = field::Empty,
    )
}

/// Sensitive data redaction utilities
pub mod redaction {
    use regex::Regex;
    use std::sync::OnceLock;

    static BEARER_REGEX: OnceLock<Regex> = OnceLock::new();
    static ASSIGNMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    static GROQ_KEY_REGEX: OnceLock<Regex> = OnceLock::new();

    fn bearer() -> &'static Regex {
        BEARER_REGEX.get_or_init(|| {
            Regex::new(r"(?i)\b(bearer)\s+[A-Za-z0-9_.\-]{6,}").expect("valid bearer pattern")
        })
    }

    fn assignment() -> &'static Regex {
        ASSIGNMENT_REGEX.get_or_init(|| {
            Regex::new(r#"(?i)\b(api[_-]?key|token|password|secret)\s*[=:]\s*['"]?[^\s'",]{3,}['"]?"#)
                .expect("valid assignment pattern")
        })
    }

    fn groq_key() -> &'static Regex {
        GROQ_KEY_REGEX.get_or_init(|| Regex::new(r"\bgsk_[A-Za-z0-9]{10,}").expect("valid key pattern"))
    }

    /// Redact sensitive information from a string
    pub fn redact_sensitive(input: &str) -> String {
        let result = bearer().replace_all(input, "$1 ***");
        let result = assignment().replace_all(&result, "$1=***");
        groq_key().replace_all(&result, "***").into_owned()
    }

    /// Redact sensitive information from JSON values
    pub fn redact_json_value(value: &mut serde_json::Value) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, val) in map.iter_mut() {
                    if is_sensitive_key(key) {
                        *val = serde_json::Value::String("***".to_string());
                    } else {
                        redact_json_value(val);
                    }
                }
            }
            serde_json::Value::Array(arr) => {
                for item in arr.iter_mut() {
                    redact_json_value(item);
                }
            }
            serde_json::Value::String(s) => {
                *s = redact_sensitive(s);
            }
            _ => {}
        }
    }

    /// Whether a JSON key names a secret (`max_tokens` is not one)
    fn is_sensitive_key(key: &str) -> bool {
        let key = key.to_lowercase();
        matches!(
            key.as_str(),
            "authorization" | "api_key" | "apikey" | "token" | "access_token" | "password" | "secret"
        ) || key.ends_with("_secret")
            || key.ends_with("_password")
    }
}

/// Performance timing utilities
pub mod timing {
    use std::time::{Duration, Instant};
    use tracing::Span;

    /// A timer that records its duration on its span when finished or dropped
    pub struct Timer {
        start: Instant,
        span: Span,
        operation: String,
        finished: bool,
    }

    impl Timer {
        pub fn new(operation: &str) -> Self {
            Self::start(operation, None)
        }

        pub fn with_details(operation: &str, details: &str) -> Self {
            Self::start(operation, Some(details))
        }

        fn start(operation: &str, details: Option<&str>) -> Self {
            Self {
                start: Instant::now(),
                span: super::create_operation_span(operation, details),
                operation: operation.to_string(),
                finished: false,
            }
        }

        pub fn span(&self) -> &Span {
            &self.span
        }

        /// Finish the timer and log the duration
        pub fn finish(mut self) -> Duration {
            let duration = self.record();
            tracing::info!(
                operation = %self.operation,
                duration_ms = duration.as_millis() as u64,
                "Operation completed"
            );
            duration
        }

        fn record(&mut self) -> Duration {
            let duration = self.start.elapsed();
            self.span.record("duration_ms", duration.as_millis() as u64);
            self.finished = true;
            duration
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            if !self.finished {
                let duration = self.record();
                tracing::debug!(
                    operation = %self.operation,
                    duration_ms = duration.as_millis() as u64,
                    "Operation completed (auto-timed)"
                );
            }
        }
    }
}
