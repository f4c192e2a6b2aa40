//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Command-line arguments
//!
//! The result is frozen into a [`plangen_core::Settings`] before the
//! pipeline runs.

use crate::cli::RequestArgs;
use crate::error::{Error, Result};
use plangen_core::client::{DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use plangen_core::pipeline::DEFAULT_PLANS_DIR;
use plangen_core::{ClientSettings, GenerationMode, Settings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion endpoint settings
    pub api: ApiConfig,

    /// Path settings
    pub paths: PathConfig,

    /// Generation defaults
    pub generation: GenerationConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Completion endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Chat-completion URL
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature
    pub temperature: f32,

    /// Output token budget for the full flow
    pub max_tokens: u32,
}

/// Path configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Directory holding plan files and generated content
    pub plans_dir: PathBuf,
}

/// Generation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Which flow runs when `--simple` is not given
    pub mode: GenerationMode,

    /// Offer titles from plan files
    pub use_plan_files: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: client.timeout_secs,
            temperature: client.temperature,
            max_tokens: client.max_tokens,
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            plans_dir: PathBuf::from(DEFAULT_PLANS_DIR),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mode: GenerationMode::Full,
            use_plan_files: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub simple: bool,
    pub use_plan_files: Option<bool>,
    pub plans_dir: Option<PathBuf>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl From<&RequestArgs> for Overrides {
    fn from(args: &RequestArgs) -> Self {
        Self {
            simple: args.simple,
            use_plan_files: args.plan_files_override(),
            plans_dir: args.plans_dir.clone(),
            model: args.model.clone(),
            max_tokens: args.max_tokens,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading configuration");
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check, in order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".plangen.yaml"),
            PathBuf::from(".plangen.json"),
            PathBuf::from("plangen.yaml"),
            PathBuf::from("plangen.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let plangen_dir = config_dir.join("plangen");
            paths.push(plangen_dir.join("config.yaml"));
            paths.push(plangen_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".plangen.yaml"));
            paths.push(home_dir.join(".plangen.json"));
        }

        paths
    }

    /// Freeze into pipeline settings, applying command-line overrides
    pub fn into_settings(self, overrides: Overrides) -> Result<Settings> {
        let api = self.api;
        let max_tokens = overrides.max_tokens.unwrap_or(api.max_tokens);
        if max_tokens == 0 {
            return Err(Error::config("max_tokens must be greater than zero"));
        }
        let timeout_secs = overrides.timeout_secs.unwrap_or(api.timeout_secs);
        if timeout_secs == 0 {
            return Err(Error::config("timeout must be greater than zero"));
        }
        if !(0.0..=2.0).contains(&api.temperature) {
            return Err(Error::config(format!(
                "temperature must be between 0 and 2, got {}",
                api.temperature
            )));
        }

        let mode = if overrides.simple {
            GenerationMode::Simple
        } else {
            self.generation.mode
        };

        Ok(Settings {
            client: ClientSettings {
                endpoint: api.endpoint,
                model: overrides.model.unwrap_or(api.model),
                api_key_env: api.api_key_env,
                timeout_secs,
                temperature: api.temperature,
                max_tokens,
            },
            plans_dir: overrides.plans_dir.unwrap_or(self.paths.plans_dir),
            mode,
            use_plan_files: overrides
                .use_plan_files
                .unwrap_or(self.generation.use_plan_files),
        })
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_pipeline_defaults() {
        let settings = Config::default()
            .into_settings(Overrides::default())
            .unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plangen.yaml");
        std::fs::write(
            &path,
            "api:\n  model: llama-3.3-70b-versatile\ngeneration:\n  mode: simple\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api.model, "llama-3.3-70b-versatile");
        assert_eq!(config.api.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.generation.mode, GenerationMode::Simple);
        assert!(config.generation.use_plan_files);
    }

    #[test]
    fn json_config_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.paths.plans_dir = PathBuf::from("content");
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = Config::from_file(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn overrides_take_precedence() {
        let overrides = Overrides {
            simple: true,
            use_plan_files: Some(false),
            plans_dir: Some(PathBuf::from("/tmp/out")),
            model: Some("mixtral".to_string()),
            max_tokens: Some(512),
            timeout_secs: Some(5),
        };
        let settings = Config::default().into_settings(overrides).unwrap();

        assert_eq!(settings.mode, GenerationMode::Simple);
        assert!(!settings.use_plan_files);
        assert_eq!(settings.plans_dir, PathBuf::from("/tmp/out"));
        assert_eq!(settings.client.model, "mixtral");
        assert_eq!(settings.client.max_tokens, 512);
        assert_eq!(settings.client.timeout_secs, 5);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let overrides = Overrides {
            timeout_secs: Some(0),
            ..Overrides::default()
        };
        assert!(matches!(
            Config::default().into_settings(overrides),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn search_order_starts_in_working_directory() {
        let paths = Config::default_config_paths();
        assert_eq!(paths[0], PathBuf::from(".plangen.yaml"));
        assert_eq!(paths[3], PathBuf::from("plangen.json"));
    }
}
