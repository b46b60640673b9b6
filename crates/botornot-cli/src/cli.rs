//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BotOrNot CLI - Ask a reasoning agent and audit where its answer came from.
#[derive(Debug, Parser)]
#[command(name = "botornot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Agent backend URL, overriding the profile
    #[arg(short, long, global = true, env = "BOTORNOT_BACKEND")]
    pub backend: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (answer text only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask the agent one question and show the audited answer
    Ask(AskArgs),

    /// Find domain experts through the agent
    Experts(ExpertsArgs),

    /// Analyze a saved answer and trace without contacting the agent
    Analyze(AnalyzeArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive chat mode
    Repl,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Question text
    #[arg(required = true)]
    pub question: Vec<String>,

    /// Highlight the n-th source (1-based)
    #[arg(long)]
    pub highlight: Option<usize>,
}

impl AskArgs {
    /// Question words joined into one string
    pub fn question_text(&self) -> String {
        self.question.join(" ")
    }
}

/// Arguments for the experts command.
#[derive(Debug, Parser)]
pub struct ExpertsArgs {
    /// Category or industry
    #[arg(long, default_value = "Energy")]
    pub category: String,

    /// Location filter
    #[arg(short, long, default_value = "Any")]
    pub location: String,

    /// Keywords describing the needed expertise
    #[arg(short, long, default_value = "battery cell technology")]
    pub keywords: String,

    /// Number of experts (1-20)
    #[arg(short = 'n', long, default_value = "5")]
    pub count: u32,

    /// Show the detail view of the n-th expert (1-based)
    #[arg(long)]
    pub detail: Option<usize>,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// File holding the agent answer
    #[arg(short, long)]
    pub answer: PathBuf,

    /// File holding the agent trace
    #[arg(short, long)]
    pub trace: Option<PathBuf>,

    /// Highlight the n-th source (1-based)
    #[arg(long)]
    pub highlight: Option<usize>,

    /// Segment the answer by sentence instead of by line
    #[arg(long)]
    pub sentences: bool,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Agent backend URL
        #[arg(short, long)]
        url: String,
        /// Request timeout in seconds
        #[arg(short, long, default_value = "120")]
        timeout: u64,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
