//! Plangen CLI - interactive learning plan content generator
//!
//! Collects a handful of answers from the operator, renders them into a
//! prompt, asks a chat-completion endpoint for markdown and files the result
//! under the plans directory.

mod cli;
mod collector;
mod config;
mod error;
mod handlers;
mod logging;
mod output;
mod spinner;

use cli::{Cli, Commands, GenerateArgs};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

/// Exit status after an interrupt
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[tokio::main]
async fn main() {
    // before parsing so `.env` can supply PLANGEN_CONFIG
    let dotenv = plangen_core::load_dotenv();
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    let log_guard = match init_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };
    if let Some(path) = &dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    spawn_interrupt_listener();

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!(
                error = %logging::redaction::redact_sensitive(&e.to_string()),
                "Command failed"
            );
            eprintln!(
                "\n{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );
            e.exit_code()
        }
    };

    // flush the file writer before exiting
    drop(log_guard);
    process::exit(code);
}

/// Main application logic
#[instrument(skip(cli), fields(command = ?cli.command))]
async fn run(cli: Cli) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let config = {
        let _config_timer = Timer::new("config_loading");
        Config::load_with_file(cli.config.as_deref())?
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);
    let mut output =
        OutputWriter::new(cli.output, use_color, cli.quiet).with_progress(config.output.progress);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command.unwrap_or_else(|| Commands::Generate(GenerateArgs::default())) {
        Commands::Generate(args) => handlers::handle_generate(args, &config, &mut output).await,
        Commands::Preview(args) => handlers::handle_preview(args, &config, &mut output).await,
        Commands::Plans(args) => handlers::handle_plans(args, &config, &mut output).await,
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_env();

    if cli.quiet {
        logging_config.level = "error".to_string();
    }
    logging_config.ansi = cli.use_color();

    logging::init_logging(logging_config)
}

/// Print a goodbye and exit when the operator hits Ctrl-C
fn spawn_interrupt_listener() {
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n\n👋 Cancelled by user.");
            process::exit(INTERRUPTED_EXIT_CODE);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["plangen", "--quiet", "plans"]);
        assert_eq!(cli.verbosity_level(), 0);
        assert!(matches!(cli.command, Some(Commands::Plans(_))));

        let cli = Cli::parse_from(["plangen", "-o", "json", "preview", "--simple"]);
        assert_eq!(cli.output, cli::OutputFormat::Json);
        assert!(matches!(cli.command, Some(Commands::Preview(ref a)) if a.request.simple));
    }
}
