//! Per-topic retention analysis.
//!
//! Folds per-session topic results into [`TopicAggregate`]s and turns each
//! aggregate into a [`TopicAnalysis`] at a caller-supplied instant.
//!
//! # Time
//!
//! "Now" is always an explicit argument. Analyses are comparable only when
//! every topic in a pass is evaluated against the same instant, so
//! [`analyze_topics`] takes a single `now` for all of them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::forgetting::ForgettingCurve;
use crate::priority::{entropy, priority_index};

/// One session's result on one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicResult {
    /// Topic name.
    pub topic: String,

    #[serde(default)]
    pub correct: u32,

    #[serde(default)]
    pub wrong: u32,
}

/// Cumulative performance on one topic across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicAggregate {
    pub correct: u64,
    pub wrong: u64,

    /// Number of sessions that touched this topic.
    pub exposures: u32,

    /// Most recent completion among contributing sessions.
    pub last_reviewed_at: DateTime<Utc>,
}

impl TopicAggregate {
    /// Starts an aggregate from a first session's result.
    ///
    /// A session without a completion time is dated at `now`.
    pub fn first(
        correct: u32,
        wrong: u32,
        completed_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            correct: u64::from(correct),
            wrong: u64::from(wrong),
            exposures: 1,
            last_reviewed_at: completed_at.unwrap_or(now),
        }
    }

    /// Folds another session's result in.
    ///
    /// `last_reviewed_at` only moves forward.
    pub fn record(&mut self, correct: u32, wrong: u32, completed_at: Option<DateTime<Utc>>) {
        self.correct += u64::from(correct);
        self.wrong += u64::from(wrong);
        self.exposures = self.exposures.saturating_add(1);
        if let Some(at) = completed_at {
            self.last_reviewed_at = self.last_reviewed_at.max(at);
        }
    }

    pub const fn total(&self) -> u64 {
        self.correct + self.wrong
    }
}

/// Aggregates topic results across sessions, keyed by topic name.
///
/// Each item pairs a session's completion time with its per-topic results.
/// The result does not depend on input order: dated sessions are folded
/// oldest first and undated ones last, so an undated session only dates a
/// topic (at `now`) when no dated session touched it.
pub fn aggregate_topics<'a, I>(sessions: I, now: DateTime<Utc>) -> BTreeMap<String, TopicAggregate>
where
    I: IntoIterator<Item = (Option<DateTime<Utc>>, &'a [TopicResult])>,
{
    let mut sessions: Vec<_> = sessions.into_iter().collect();
    sessions.sort_by_key(|(completed_at, _)| (completed_at.is_none(), *completed_at));

    let mut topics: BTreeMap<String, TopicAggregate> = BTreeMap::new();

    for (completed_at, results) in sessions {
        for result in results {
            match topics.get_mut(&result.topic) {
                Some(aggregate) => aggregate.record(result.correct, result.wrong, completed_at),
                None => {
                    topics.insert(
                        result.topic.clone(),
                        TopicAggregate::first(result.correct, result.wrong, completed_at, now),
                    );
                }
            }
        }
    }

    topics
}

/// Retention analysis of one topic at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicAnalysis {
    pub topic: String,

    /// Historical accuracy in percent, one decimal.
    pub accuracy_pct: f64,

    /// Modeled retention now in percent, one decimal.
    pub retention_pct: f64,

    pub exposures: u32,

    /// Whole days since the last review.
    pub days_since_review: u32,

    /// Hours until retention decays to the review target, one decimal.
    pub hours_until_review: f64,

    /// Review priority, three decimals.
    pub priority_index: f64,
}

impl TopicAnalysis {
    fn empty(topic: &str, exposures: u32) -> Self {
        Self {
            topic: topic.to_string(),
            accuracy_pct: 0.0,
            retention_pct: 0.0,
            exposures,
            days_since_review: 0,
            hours_until_review: 0.0,
            priority_index: 0.0,
        }
    }
}

/// Analyzes a single topic at `now`.
///
/// Topics without answers yield an all-zero analysis. A review timestamp in
/// the future (clock skew) counts as zero elapsed time.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn analyze_topic(
    topic: &str,
    aggregate: &TopicAggregate,
    now: DateTime<Utc>,
    curve: &ForgettingCurve,
) -> TopicAnalysis {
    let total = aggregate.total();
    if total == 0 {
        return TopicAnalysis::empty(topic, aggregate.exposures);
    }

    let accuracy = aggregate.correct as f64 / total as f64;
    let elapsed_ms = (now - aggregate.last_reviewed_at).num_milliseconds().max(0);
    let hours_elapsed = elapsed_ms as f64 / 3_600_000.0;
    let days_since_review = (hours_elapsed / 24.0).floor() as u32;

    let retention = curve.retention_rate(accuracy, hours_elapsed);
    let priority = priority_index(entropy(aggregate.correct, total), aggregate.exposures);
    let hours_until = curve.hours_until_target(retention);

    tracing::trace!(topic, accuracy, hours_elapsed, retention, priority, "analyzed topic");

    TopicAnalysis {
        topic: topic.to_string(),
        accuracy_pct: round_to(accuracy * 100.0, 1),
        retention_pct: round_to(retention * 100.0, 1),
        exposures: aggregate.exposures,
        days_since_review,
        hours_until_review: round_to(hours_until, 1),
        priority_index: round_to(priority, 3),
    }
}

/// Analyzes every topic against the same `now`, in topic-name order.
pub fn analyze_topics(
    topics: &BTreeMap<String, TopicAggregate>,
    now: DateTime<Utc>,
    curve: &ForgettingCurve,
) -> Vec<TopicAnalysis> {
    let entries: Vec<_> = topics.iter().collect();
    entries
        .par_iter()
        .map(|(topic, aggregate)| analyze_topic(topic, aggregate, now, curve))
        .collect()
}

/// Rounds to `decimals` places, halves to even.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
