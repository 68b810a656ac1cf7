//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Quiz study analytics.
///
/// Predicts exam outcomes and plans topic reviews from a quiz's study
/// session history.
#[derive(Debug, Parser)]
#[command(name = "qz", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Predict the outcome of an upcoming exam.
    Predict {
        #[command(flatten)]
        history: HistoryArgs,

        /// Number of questions in the exam.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        exam_questions: u32,

        /// Minimum correct answers needed to pass.
        #[arg(long)]
        min_score: f64,
    },

    /// Report per-topic retention.
    Retention {
        #[command(flatten)]
        history: HistoryArgs,
    },

    /// Show the prioritized review schedule.
    Schedule {
        #[command(flatten)]
        history: HistoryArgs,
    },

    /// Rank topics by accuracy and summarize session scores.
    Topics {
        #[command(flatten)]
        history: HistoryArgs,
    },
}

/// Arguments shared by every analysis command.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Session history JSON file ("-" for stdin).
    pub input: PathBuf,

    /// Evaluate as of this time (ISO 8601 or e.g. "2 days ago").
    #[arg(long)]
    pub now: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}
