use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "moodcheck",
    version,
    about = "Score a nine-item wellbeing questionnaire into a severity bucket"
)]
pub struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score one answer set
    Score(ScoreArgs),
    /// Score every response file under a directory
    Batch(BatchArgs),
    /// List the questionnaire items
    Questions(QuestionsArgs),
    /// Write a default moodcheck.toml in the current directory
    Init,
}

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    /// JSON or TOML file mapping q1..q9 to answers
    #[arg(long, conflicts_with = "answer", required_unless_present = "answer")]
    pub file: Option<PathBuf>,
    /// Answer as qN=V, repeat for each question
    #[arg(long, value_name = "qN=V")]
    pub answer: Vec<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct QuestionsArgs {
    #[arg(long)]
    pub json: bool,
}
