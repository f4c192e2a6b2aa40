//! Plans command handler

use crate::cli::PlansArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use plangen_core::plans::load_plan_titles;
use plangen_core::Catalog;
use tracing::instrument;

/// List the titles parsed from the plan files
#[instrument(skip(config, output))]
pub async fn handle_plans(args: PlansArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let plans_dir = args.plans_dir.unwrap_or_else(|| config.paths.plans_dir.clone());
    let entries = load_plan_titles(&plans_dir, &Catalog::standard());

    if !output.is_human() {
        return output.data(&entries);
    }

    if entries.is_empty() {
        output.warning(&format!("No plan titles found in {}", plans_dir.display()))?;
        return Ok(());
    }

    output.section(&format!("Plan titles ({})", entries.len()))?;
    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.difficulty.to_string(),
                e.domain_label.clone(),
                e.title.clone(),
            ]
        })
        .collect();
    output.table(&["Difficulty", "Domain", "Title"], rows)
}
