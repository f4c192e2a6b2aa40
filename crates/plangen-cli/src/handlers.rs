//! Command handlers for CLI subcommands
//!
//! Each subcommand lives in its own module; the helpers here are shared by
//! the commands that run the questionnaire.

mod completions;
mod generate;
mod plans;
mod preview;

pub use completions::handle_completions;
pub use generate::handle_generate;
pub use plans::handle_plans;
pub use preview::handle_preview;

use crate::collector::{self, PlanTitles, TerminalPrompter};
use crate::error::Result;
use crate::output::OutputWriter;
use colored::control::SHOULD_COLORIZE;
use plangen_core::{Catalog, GenerationRequest, Settings};
use std::io::{self, Write};
use tracing::debug;

/// Prompter bound to the process terminal
///
/// Questions go to stderr when stdout carries machine-readable output.
pub(crate) type StdPrompter = TerminalPrompter<io::StdinLock<'static>, Box<dyn Write>>;

pub(crate) fn terminal_prompter(output: &OutputWriter) -> StdPrompter {
    let writer: Box<dyn Write> = if output.is_human() {
        Box::new(io::stdout())
    } else {
        Box::new(io::stderr())
    };
    TerminalPrompter::new(io::stdin().lock(), writer, SHOULD_COLORIZE.should_colorize())
}

/// Run the questionnaire using the plan titles the settings allow
pub(crate) fn collect_request(
    prompter: &mut StdPrompter,
    catalog: &Catalog,
    settings: &Settings,
) -> Result<Option<GenerationRequest>> {
    let entries = if settings.use_plan_files {
        settings.plan_titles(catalog)
    } else {
        Vec::new()
    };
    debug!(
        enabled = settings.use_plan_files,
        count = entries.len(),
        "Plan titles loaded"
    );

    let plans = if settings.use_plan_files {
        PlanTitles::Offered(&entries)
    } else {
        PlanTitles::Disabled
    };
    collector::collect(prompter, catalog, settings.mode, plans)
}
