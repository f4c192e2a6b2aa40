//! Preview command handler

use crate::cli::PreviewArgs;
use crate::config::{Config, Overrides};
use crate::error::Result;
use crate::logging::redaction;
use crate::output::OutputWriter;
use plangen_core::{Catalog, ChatPayload, ContentWriter, GenerationRequest};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

use super::{collect_request, terminal_prompter};

/// What a generate run would send and where it would write
#[derive(Debug, Serialize)]
struct PreviewReport<'a> {
    request: &'a GenerationRequest,
    payload: ChatPayload,
    path: PathBuf,
}

/// Handle the preview command
///
/// Runs the questionnaire and prints the prompt and request body; nothing
/// is sent and nothing is written.
#[instrument(skip(config, output))]
pub async fn handle_preview(
    args: PreviewArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let settings = config.clone().into_settings(Overrides::from(&args.request))?;
    let catalog = Catalog::standard();

    let mut prompter = terminal_prompter(output);
    let Some(request) = collect_request(&mut prompter, &catalog, &settings)? else {
        output.info("👋 Cancelled by user.")?;
        return Ok(());
    };

    let payload = settings.payload_for(&request);
    let path = ContentWriter::new(&settings.plans_dir).path_for(&request);
    info!(title = request.title(), path = %path.display(), "Previewing request");

    if !output.is_human() {
        return output.data(&PreviewReport {
            request: &request,
            payload,
            path,
        });
    }

    output.section("System prompt")?;
    output.writeln(&payload.messages[0].content)?;
    output.section("User prompt")?;
    output.writeln(&payload.messages[1].content)?;

    output.section("Request")?;
    let mut body = serde_json::to_value(&payload)?;
    body["messages"] = serde_json::Value::String(format!("[{} messages]", payload.messages.len()));
    redaction::redact_json_value(&mut body);
    output.writeln(&format!("POST {}", settings.client.endpoint))?;
    output.writeln(&serde_json::to_string_pretty(&body)?)?;

    output.info(&format!("\nWould be saved to: {}", path.display()))
}
