use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use qz_core::ForgettingCurve;
use tracing_subscriber::EnvFilter;

use qz_cli::commands::{predict, retention, schedule, topics, util};
use qz_cli::{Cli, Commands, Config, HistoryArgs, QuizHistory};

/// Load and validate configuration.
fn load_config(config_path: Option<&Path>) -> Result<(Config, ForgettingCurve)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let curve = config
        .forgetting_curve()
        .context("invalid forgetting-curve configuration")?;
    Ok((config, curve))
}

/// Load the history file and resolve the evaluation time once.
fn load_history(args: &HistoryArgs) -> Result<(QuizHistory, DateTime<Utc>)> {
    let history = QuizHistory::load(&args.input)?;
    let now = util::resolve_now(args.now.as_deref())?;
    Ok((history, now))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Predict {
            history,
            exam_questions,
            min_score,
        }) => {
            let (_config, curve) = load_config(cli.config.as_deref())?;
            let exam = predict::Exam::new(*exam_questions, *min_score)?;
            let (quiz, now) = load_history(history)?;
            predict::run(&mut stdout, &quiz, exam, now, &curve, history.json)?;
        }
        Some(Commands::Retention { history }) => {
            let (config, curve) = load_config(cli.config.as_deref())?;
            let thresholds = config
                .thresholds()
                .context("invalid retention thresholds")?;
            let (quiz, now) = load_history(history)?;
            retention::run(&mut stdout, &quiz, now, &curve, &thresholds, history.json)?;
        }
        Some(Commands::Schedule { history }) => {
            let (_config, curve) = load_config(cli.config.as_deref())?;
            let (quiz, now) = load_history(history)?;
            schedule::run(&mut stdout, &quiz, now, &curve, history.json)?;
        }
        Some(Commands::Topics { history }) => {
            let (quiz, now) = load_history(history)?;
            topics::run(&mut stdout, &quiz, now, history.json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
