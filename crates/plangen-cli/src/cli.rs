//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Plangen CLI - generate learning plan content with an LLM
///
/// Walks through a short questionnaire (title, domain, difficulty, ...),
/// sends the rendered prompt to a chat-completion endpoint and stores the
/// markdown it returns under the plans directory.
#[derive(Parser, Debug)]
#[command(
    name = "plangen",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PLANGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run (defaults to `generate`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactively collect a request, generate content and save it
    Generate(GenerateArgs),

    /// Collect a request and show the prompt and payload without calling the API
    Preview(PreviewArgs),

    /// List the topic titles found in the plan files
    Plans(PlansArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Options shared by commands that run the questionnaire
#[derive(Args, Debug, Clone, Default)]
pub struct RequestArgs {
    /// Use the simple flow (content size instead of category/content type, no front matter)
    #[arg(long)]
    pub simple: bool,

    /// Offer titles parsed from existing plan files
    #[arg(long, overrides_with = "no_plans")]
    pub plans: bool,

    /// Always enter the title manually
    #[arg(long)]
    pub no_plans: bool,

    /// Directory holding plan files and generated content
    #[arg(long, value_name = "DIR")]
    pub plans_dir: Option<PathBuf>,

    /// Model identifier to request
    #[arg(short, long)]
    pub model: Option<String>,

    /// Output token budget for the full flow
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

/// Arguments for the generate command
#[derive(Parser, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print the generated content after saving without asking
    #[arg(long, conflicts_with = "no_view")]
    pub view: bool,

    /// Never offer to print the generated content
    #[arg(long)]
    pub no_view: bool,
}

/// Arguments for the preview command
#[derive(Parser, Debug, Clone)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

/// Arguments for the plans command
#[derive(Parser, Debug, Clone)]
pub struct PlansArgs {
    /// Directory holding plan files
    #[arg(long, value_name = "DIR")]
    pub plans_dir: Option<PathBuf>,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl RequestArgs {
    /// Explicit plan-file choice from the flags, if any
    pub fn plan_files_override(&self) -> Option<bool> {
        match (self.plans, self.no_plans) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            _ => None,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
