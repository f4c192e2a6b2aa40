//! Generate command handler

use crate::cli::GenerateArgs;
use crate::collector::Prompter;
use crate::config::{Config, Overrides};
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use crate::spinner::while_spinning;
use plangen_core::{ApiKey, Catalog, CompletionClient, GenerationMode, Pipeline};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument, Instrument};

use super::{collect_request, terminal_prompter};

/// Whether to print the content after saving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewChoice {
    Always,
    Never,
    Ask,
}

impl ViewChoice {
    fn from_args(args: &GenerateArgs) -> Self {
        match (args.view, args.no_view) {
            (true, _) => ViewChoice::Always,
            (false, true) => ViewChoice::Never,
            _ => ViewChoice::Ask,
        }
    }
}

/// Summary reported in machine-readable output
#[derive(Debug, Serialize)]
struct GenerateReport<'a> {
    path: PathBuf,
    title: &'a str,
    domain: &'a str,
    difficulty: &'a str,
    mode: GenerationMode,
    model: &'a str,
    bytes: usize,
}

/// Handle the generate command
#[instrument(skip(config, output))]
pub async fn handle_generate(
    args: GenerateArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let mut overrides = Overrides::from(&args.request);
    overrides.timeout_secs = args.timeout;
    let settings = config.clone().into_settings(overrides)?;

    // the credential is checked before the operator answers anything
    let var = settings.client.api_key_env.clone();
    let api_key = ApiKey::from_env(&var).map_err(|_| Error::ApiKeyMissing { var })?;
    let client = CompletionClient::new(settings.client.clone(), api_key)?;
    let pipeline = Pipeline::with_client(settings, client);
    let catalog = Catalog::standard();

    let mut prompter = terminal_prompter(output);
    let Some(request) = collect_request(&mut prompter, &catalog, pipeline.settings())? else {
        output.info("\n👋 Cancelled by user.")?;
        return Ok(());
    };

    output.info(&format!(
        "\n📝 Generating {} for: {}",
        request.content_label(),
        request.title()
    ))?;

    let timer = Timer::with_details("completion", request.title());
    let spinner = output.spinner("Generating content...");
    let content = while_spinning(
        spinner,
        pipeline.complete(&request).instrument(timer.span().clone()),
    )
    .await?;
    timer.finish();

    let path = pipeline.save(&content, &request)?;
    info!(path = %path.display(), "Generation finished");

    if !output.is_human() {
        return output.data(&GenerateReport {
            path,
            title: request.title(),
            domain: &request.domain().key,
            difficulty: request.difficulty().label(),
            mode: request.mode(),
            model: &pipeline.settings().client.model,
            bytes: content.len(),
        });
    }

    output.success(&format!("Content saved to: {}", path.display()))?;

    if request.mode() == GenerationMode::Full
        && should_view(ViewChoice::from_args(&args), &mut prompter)?
    {
        output.writeln("")?;
        output.rule()?;
        output.writeln(&content)?;
        output.rule()?;
    }

    Ok(())
}

fn should_view<P: Prompter>(choice: ViewChoice, prompter: &mut P) -> Result<bool> {
    match choice {
        ViewChoice::Always => Ok(true),
        ViewChoice::Never => Ok(false),
        // end of input here just means "no"
        ViewChoice::Ask => Ok(prompter
            .confirm("👀 Would you like to view the generated content?", false)?
            .unwrap_or(false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::TerminalPrompter;
    use std::io::Cursor;

    fn prompter(script: &str) -> TerminalPrompter<Cursor<String>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(script.to_string()), Vec::new(), false)
    }

    #[test]
    fn view_flags_select_choice() {
        let mut args = GenerateArgs::default();
        assert_eq!(ViewChoice::from_args(&args), ViewChoice::Ask);
        args.view = true;
        assert_eq!(ViewChoice::from_args(&args), ViewChoice::Always);
        args.view = false;
        args.no_view = true;
        assert_eq!(ViewChoice::from_args(&args), ViewChoice::Never);
    }

    #[test]
    fn asking_defaults_to_no() {
        assert!(!should_view(ViewChoice::Ask, &mut prompter("\n")).unwrap());
        assert!(!should_view(ViewChoice::Ask, &mut prompter("")).unwrap());
        assert!(should_view(ViewChoice::Ask, &mut prompter("y\n")).unwrap());
    }

    #[test]
    fn flags_skip_the_question() {
        let mut p = prompter("");
        assert!(should_view(ViewChoice::Always, &mut p).unwrap());
        assert!(!should_view(ViewChoice::Never, &mut p).unwrap());
        assert!(p.into_writer().is_empty());
    }

    #[tokio::test]
    async fn missing_credential_stops_before_prompting() {
        let mut config = Config::default();
        config.api.api_key_env = "PLANGEN_CLI_TEST_KEY_NOT_SET".to_string();
        let mut output = OutputWriter::with_writer(
            crate::cli::OutputFormat::Human,
            false,
            false,
            Box::new(std::io::sink()),
        );

        let err = handle_generate(GenerateArgs::default(), &config, &mut output)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ApiKeyMissing { ref var } if var == "PLANGEN_CLI_TEST_KEY_NOT_SET"));
        assert!(err.help().unwrap().contains("PLANGEN_CLI_TEST_KEY_NOT_SET=your_api_key_here"));
    }
}
