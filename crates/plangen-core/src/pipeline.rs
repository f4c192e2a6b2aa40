//! The generation pipeline: render prompt, request completion, persist

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::catalog::Catalog;
use crate::client::{ChatPayload, ClientSettings, CompletionClient};
use crate::error::Result;
use crate::plans::{load_plan_titles, PlanTitleEntry};
use crate::prompt::{build_prompt, system_prompt};
use crate::request::{GenerationMode, GenerationRequest};
use crate::writer::ContentWriter;

/// Default directory holding plan files and generated content
pub const DEFAULT_PLANS_DIR: &str = "plans";

/// Immutable process-wide settings handed to the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub client: ClientSettings,
    pub plans_dir: PathBuf,
    pub mode: GenerationMode,
    pub use_plan_files: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client: ClientSettings::default(),
            plans_dir: PathBuf::from(DEFAULT_PLANS_DIR),
            mode: GenerationMode::Full,
            use_plan_files: true,
        }
    }
}

impl Settings {
    /// Chat payload for a request; pure, needs no credential
    pub fn payload_for(&self, request: &GenerationRequest) -> ChatPayload {
        self.client.payload(
            system_prompt(request.mode()),
            &build_prompt(request),
            request.max_tokens(self.client.max_tokens),
        )
    }

    /// Titles offered for selection, best-effort
    pub fn plan_titles(&self, catalog: &Catalog) -> Vec<PlanTitleEntry> {
        load_plan_titles(&self.plans_dir, catalog)
    }
}

/// Completion client and content writer bound to one set of settings
#[derive(Debug, Clone)]
pub struct Pipeline {
    settings: Settings,
    client: CompletionClient,
    writer: ContentWriter,
}

impl Pipeline {
    /// Build the pipeline, resolving the credential from the environment.
    ///
    /// Fails with a configuration error before anything touches the network
    /// or the filesystem.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let client = CompletionClient::from_env(settings.client.clone())?;
        Ok(Self::with_client(settings, client))
    }

    /// Build the pipeline around an existing client
    pub fn with_client(settings: Settings, client: CompletionClient) -> Self {
        let writer = ContentWriter::new(settings.plans_dir.clone());
        Self {
            settings,
            client,
            writer,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn writer(&self) -> &ContentWriter {
        &self.writer
    }

    /// Render the request and fetch its completion
    pub async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        let payload = self.settings.payload_for(request);
        info!(
            title = request.title(),
            mode = %request.mode(),
            max_tokens = payload.max_tokens,
            "Requesting completion"
        );
        self.client.complete(&payload).await
    }

    /// Persist a completion for its request
    pub fn save(&self, content: &str, request: &GenerationRequest) -> Result<PathBuf> {
        self.writer.write(content, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ContentSize, Difficulty};
    use crate::prompt::FULL_SYSTEM_PROMPT;

    #[test]
    fn payload_for_full_request_uses_configured_budget() {
        let settings = Settings::default();
        let request = GenerationRequest::builder(GenerationMode::Full)
            .title("Recursion")
            .domain("computer_science")
            .difficulty(Difficulty::Basic)
            .build(&Catalog::standard())
            .unwrap();

        let payload = settings.payload_for(&request);
        assert_eq!(payload.max_tokens, 4096);
        assert_eq!(payload.messages[0].content, FULL_SYSTEM_PROMPT);
        assert!(payload.messages[1].content.contains("**Title:** Recursion"));
    }

    #[test]
    fn payload_for_simple_request_uses_size_budget() {
        let settings = Settings::default();
        let request = GenerationRequest::builder(GenerationMode::Simple)
            .title("Recursion")
            .domain("computer_science")
            .difficulty(Difficulty::Basic)
            .size(ContentSize::InDepth)
            .build(&Catalog::standard())
            .unwrap();

        assert_eq!(settings.payload_for(&request).max_tokens, 6000);
    }
}
