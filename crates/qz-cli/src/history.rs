//! Session history input.
//!
//! A history file holds one quiz's study sessions with per-topic results:
//!
//! ```json
//! {
//!   "quiz": "Networking",
//!   "sessions": [
//!     {"correct": 8, "wrong": 2, "time_spent": 100, "completed_at": "2026-01-10T10:00:00Z",
//!      "topics": [{"topic": "TCP", "correct": 5, "wrong": 1}]}
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use qz_core::{SessionAggregate, TopicAggregate, TopicResult, aggregate_topics};
use serde::Deserialize;

/// A quiz's recorded study sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizHistory {
    /// Quiz name, for display.
    #[serde(default)]
    pub quiz: Option<String>,

    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
}

/// One study session as recorded.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecord {
    #[serde(flatten)]
    pub totals: SessionAggregate,

    /// Unfinished sessions are ignored by every analysis.
    #[serde(default = "default_completed")]
    pub completed: bool,

    #[serde(default)]
    pub topics: Vec<TopicResult>,
}

const fn default_completed() -> bool {
    true
}

impl QuizHistory {
    /// Reads a history from `path`, or stdin when `path` is "-".
    pub fn load(path: &Path) -> Result<Self> {
        let content = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read history from stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?
        };
        Self::parse(&content).with_context(|| format!("invalid history in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let history: Self = serde_json::from_str(content)?;
        tracing::debug!(
            quiz = history.quiz.as_deref().unwrap_or("-"),
            sessions = history.sessions.len(),
            "loaded history"
        );
        Ok(history)
    }

    /// Display name of the quiz.
    pub fn name(&self) -> &str {
        self.quiz.as_deref().unwrap_or("(unnamed quiz)")
    }

    fn completed(&self) -> impl Iterator<Item = &SessionRecord> {
        self.sessions.iter().filter(|s| s.completed)
    }

    /// Totals of completed sessions, oldest first; undated sessions last.
    pub fn completed_sessions(&self) -> Vec<SessionAggregate> {
        let mut sessions: Vec<_> = self.completed().map(|s| s.totals.clone()).collect();
        sessions.sort_by_key(|s| (s.completed_at.is_none(), s.completed_at));
        sessions
    }

    /// Per-topic aggregates over completed sessions, independent of file order.
    pub fn topic_aggregates(&self, now: DateTime<Utc>) -> BTreeMap<String, TopicAggregate> {
        aggregate_topics(
            self.completed()
                .map(|s| (s.totals.completed_at, s.topics.as_slice())),
            now,
        )
    }
}
