use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dbselector",
    version,
    about = "Weighted database selection assessments and decision records"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding dbselector.toml
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List assessment questions, their weights and options
    Questions(QuestionsCommand),
    /// List registered database candidates
    Candidates(CandidatesCommand),
    /// Score MongoDB against PostgreSQL
    Assess(AssessCommand),
    /// Score any set of registered candidates
    Compare(CompareCommand),
    /// Re-render a saved session
    Replay(ReplayCommand),
}

#[derive(Args)]
pub struct QuestionsCommand {
    /// Show the guided catalog used by `compare`
    #[arg(long)]
    pub guided: bool,
    /// Project context used for hints, as key=value
    #[arg(long = "context", value_name = "KEY=VALUE")]
    pub context: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CategoryArg {
    Relational,
    Document,
    KeyValue,
    Graph,
    Columnar,
    MultiModel,
}

#[derive(Args)]
pub struct CandidatesCommand {
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,
    /// Show suggested comparison pairs instead of candidates
    #[arg(long, conflicts_with = "category")]
    pub pairs: bool,
}

#[derive(Args)]
pub struct AnswerArgs {
    /// Core question response, as question=option
    #[arg(long = "answer", value_name = "QUESTION=OPTION")]
    pub answers: Vec<String>,
    /// Follow-up response, as question=option
    #[arg(long = "follow-up", value_name = "QUESTION=OPTION")]
    pub follow_ups: Vec<String>,
    /// Project context, as key=value
    #[arg(long = "context", value_name = "KEY=VALUE")]
    pub context: Vec<String>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Write the session to this file
    #[arg(long)]
    pub save: Option<PathBuf>,
    /// Project name for the decision record
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Args)]
pub struct AssessCommand {
    #[command(flatten)]
    pub answers: AnswerArgs,
}

#[derive(Args)]
pub struct CompareCommand {
    /// Candidate id to compare; defaults to assessment.default_candidates
    #[arg(long = "db", value_name = "ID")]
    pub dbs: Vec<String>,
    #[command(flatten)]
    pub answers: AnswerArgs,
}

#[derive(Args)]
pub struct ReplayCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
