//! Quiz study analytics CLI library.
//!
//! This crate provides the CLI interface for the analytics engine in
//! `qz-core`: it loads session histories and configuration, and renders
//! predictions, retention reports and review schedules.

mod cli;
pub mod commands;
mod config;
pub mod history;

pub use cli::{Cli, Commands, HistoryArgs};
pub use config::Config;
pub use history::QuizHistory;
