//! Title discovery from existing plan files
//!
//! Plan files are markdown documents organised as `## Domain X: <name>`
//! headings followed by topic tables. Reading them is best-effort: a missing
//! or unreadable file simply contributes no entries.

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::catalog::{Catalog, Difficulty};

/// Known plan files and the difficulty each one holds
pub const PLAN_FILES: [(&str, Difficulty); 3] = [
    ("basic_plan.md", Difficulty::Basic),
    ("intermediate_plan.md", Difficulty::Intermediate),
    ("advanced_plan.md", Difficulty::Advanced),
];

static DOMAIN_HEADING: OnceLock<Regex> = OnceLock::new();

fn domain_heading() -> &'static Regex {
    DOMAIN_HEADING.get_or_init(|| {
        Regex::new(r"^##\s+Domain\s+[A-Za-z]:\s*(.+?)\s*$").expect("valid domain heading pattern")
    })
}

/// A topic title found in a plan file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlanTitleEntry {
    pub title: String,
    pub domain_key: String,
    pub domain_label: String,
    pub difficulty: Difficulty,
}

impl PlanTitleEntry {
    /// Label shown in the selection menu
    pub fn menu_label(&self) -> String {
        format!("[{}] {} - {}", self.difficulty, self.domain_label, self.title)
    }
}

/// Parse the text of a single plan file
pub fn parse_plan(text: &str, difficulty: Difficulty, catalog: &Catalog) -> Vec<PlanTitleEntry> {
    let mut entries = Vec::new();
    let mut current_domain = None;

    for line in text.lines() {
        let line = line.trim();

        if let Some(caps) = domain_heading().captures(line) {
            let name = &caps[1];
            current_domain = catalog.domain_by_label(name);
            if current_domain.is_none() {
                debug!(domain = name, "Skipping unrecognized plan domain");
            }
            continue;
        }

        if !line.starts_with('|') {
            continue;
        }
        let Some(domain) = current_domain else {
            continue;
        };
        if let Some(title) = topic_cell(line) {
            entries.push(PlanTitleEntry {
                title,
                domain_key: domain.key.clone(),
                domain_label: domain.label.clone(),
                difficulty,
            });
        }
    }

    entries
}

/// Title cell of a table row, or `None` for separators, headers and placeholders
fn topic_cell(row: &str) -> Option<String> {
    let mut cells: Vec<&str> = row.split('|').map(str::trim).collect();
    // the leading and trailing pipes produce empty outer cells
    if cells.first() == Some(&"") {
        cells.remove(0);
    }
    if cells.last() == Some(&"") {
        cells.pop();
    }
    if cells.len() < 2 {
        return None;
    }

    let is_separator = cells
        .iter()
        .all(|c| c.chars().all(|ch| ch == '-' || ch == ':' || ch == ' '));
    if is_separator {
        return None;
    }

    let (first, title) = (cells[0], cells[1]);
    if title == "Topic" || first == "#" || first == "---" || title.is_empty() {
        return None;
    }
    Some(title.to_string())
}

/// Read every known plan file under `plans_dir`, deduplicating entries
pub fn load_plan_titles(plans_dir: &Path, catalog: &Catalog) -> Vec<PlanTitleEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for (file_name, difficulty) in PLAN_FILES {
        let path = plans_dir.join(file_name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Plan file not readable");
                continue;
            }
        };

        for entry in parse_plan(&text, difficulty, catalog) {
            if seen.insert(entry.clone()) {
                entries.push(entry);
            }
        }
    }

    debug!(count = entries.len(), "Loaded plan titles");
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
# Basic Plan

## Domain A: Mathematics

| # | Topic | Notes |
|---|-------|-------|
| 1 | Linear Algebra | vectors |
| 2 | Probability | |

## Domain Q: Cooking

| 1 | Knife Skills | |

## Domain C: Computer Science

| 1 | Big-O Notation | |
| --- | Placeholder | |
";

    #[test]
    fn parses_topics_under_known_domains() {
        let entries = parse_plan(SAMPLE, Difficulty::Basic, &Catalog::standard());
        let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Linear Algebra", "Probability", "Big-O Notation"]);

        assert_eq!(entries[0].domain_key, "mathematics");
        assert_eq!(entries[0].domain_label, "Mathematics");
        assert_eq!(entries[0].difficulty, Difficulty::Basic);
        assert_eq!(entries[2].domain_key, "computer_science");
    }

    #[test]
    fn single_heading_and_row_yield_one_entry() {
        let text = "## Domain A: Mathematics\n| 1 | Linear Algebra | ... |\n";
        let entries = parse_plan(text, Difficulty::Advanced, &Catalog::standard());
        assert_eq!(
            entries,
            vec![PlanTitleEntry {
                title: "Linear Algebra".to_string(),
                domain_key: "mathematics".to_string(),
                domain_label: "Mathematics".to_string(),
                difficulty: Difficulty::Advanced,
            }]
        );
    }

    #[test]
    fn header_and_separator_rows_are_skipped() {
        let text = "## Domain A: Mathematics\n| # | Topic | Notes |\n| --- | --- | --- |\n|:--|:--:|\n";
        assert!(parse_plan(text, Difficulty::Basic, &Catalog::standard()).is_empty());
    }

    #[test]
    fn rows_before_any_heading_are_ignored() {
        let text = "| 1 | Orphan | |\n## Domain A: Mathematics\n";
        assert!(parse_plan(text, Difficulty::Basic, &Catalog::standard()).is_empty());
    }

    #[test]
    fn loads_known_files_and_deduplicates() {
        let dir = TempDir::new().unwrap();
        let doubled = format!("{SAMPLE}\n## Domain A: Mathematics\n| 9 | Linear Algebra | again |\n");
        fs::write(dir.path().join("basic_plan.md"), doubled).unwrap();
        fs::write(
            dir.path().join("advanced_plan.md"),
            "## Domain A: Mathematics\n| 1 | Linear Algebra | |\n",
        )
        .unwrap();
        fs::write(dir.path().join("unrelated.md"), SAMPLE).unwrap();

        let entries = load_plan_titles(dir.path(), &Catalog::standard());
        let labels: Vec<_> = entries.iter().map(PlanTitleEntry::menu_label).collect();
        assert_eq!(
            labels,
            vec![
                "[Basic] Mathematics - Linear Algebra",
                "[Basic] Mathematics - Probability",
                "[Basic] Computer Science (Theory + Systems) - Big-O Notation",
                "[Advanced] Mathematics - Linear Algebra",
            ]
        );
    }

    #[test]
    fn missing_directory_yields_no_entries() {
        let dir = TempDir::new().unwrap();
        let entries = load_plan_titles(&dir.path().join("nope"), &Catalog::standard());
        assert!(entries.is_empty());
    }
}
