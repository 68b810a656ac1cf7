//! Descriptive summaries of a quiz's history.
//!
//! Unlike the retention model these do not decay with time: they rank
//! topics by raw accuracy and summarize per-session scores.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::prediction::SessionAggregate;
use crate::topic::{TopicAggregate, round_to};

/// Scale of a session score (`correct / answered * SCORE_SCALE`).
const SCORE_SCALE: f64 = 10.0;

/// Cumulative standing of one topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicStanding {
    pub topic: String,
    pub total_questions: u64,
    pub correct: u64,
    pub wrong: u64,

    /// Accuracy in percent, one decimal.
    pub accuracy_pct: f64,

    pub sessions_with_topic: u32,
}

/// Ranks topics by accuracy, weakest first.
///
/// Topics with equal accuracy keep name order. A topic without answers has
/// 0% accuracy.
#[allow(clippy::cast_precision_loss)]
pub fn topic_ranking(topics: &BTreeMap<String, TopicAggregate>) -> Vec<TopicStanding> {
    let mut ranking: Vec<TopicStanding> = topics
        .iter()
        .map(|(topic, aggregate)| {
            let total = aggregate.total();
            let accuracy = if total > 0 {
                aggregate.correct as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            TopicStanding {
                topic: topic.clone(),
                total_questions: total,
                correct: aggregate.correct,
                wrong: aggregate.wrong,
                accuracy_pct: round_to(accuracy, 1),
                sessions_with_topic: aggregate.exposures,
            }
        })
        .collect();

    ranking.sort_by(|a, b| a.accuracy_pct.total_cmp(&b.accuracy_pct));
    ranking
}

/// Score of one session on a 0-10 scale, two decimals.
///
/// 0 when nothing was answered.
pub fn session_score(session: &SessionAggregate) -> f64 {
    session
        .accuracy()
        .map_or(0.0, |accuracy| round_to(accuracy * SCORE_SCALE, 2))
}

/// Totals and score spread across sessions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub total_sessions: usize,
    pub total_questions_answered: u64,
    pub total_correct: u64,
    pub total_wrong: u64,

    /// Mean session score.
    pub average_score: f64,

    /// Seconds spent across all sessions.
    pub total_study_time: f64,

    pub best_score: f64,
    pub worst_score: f64,
}

/// Summarizes finished sessions. Every field is 0 for an empty slice.
#[allow(clippy::cast_precision_loss)]
pub fn session_summary(sessions: &[SessionAggregate]) -> SessionSummary {
    let scores: Vec<f64> = sessions.iter().map(session_score).collect();
    let total_correct: u64 = sessions.iter().map(|s| u64::from(s.correct)).sum();
    let total_wrong: u64 = sessions.iter().map(|s| u64::from(s.wrong)).sum();

    let (average_score, best_score, worst_score) = if scores.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        (
            scores.iter().sum::<f64>() / scores.len() as f64,
            scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            scores.iter().copied().fold(f64::INFINITY, f64::min),
        )
    };

    SessionSummary {
        total_sessions: sessions.len(),
        total_questions_answered: total_correct + total_wrong,
        total_correct,
        total_wrong,
        average_score,
        total_study_time: sessions.iter().map(|s| s.time_spent).sum(),
        best_score,
        worst_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn aggregate(correct: u64, wrong: u64, exposures: u32) -> TopicAggregate {
        TopicAggregate {
            correct,
            wrong,
            exposures,
            last_reviewed_at: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    fn session(correct: u32, wrong: u32, time_spent: f64) -> SessionAggregate {
        SessionAggregate {
            correct,
            wrong,
            time_spent,
            completed_at: None,
        }
    }

    #[test]
    fn ranking_puts_weakest_first() {
        let topics = BTreeMap::from([
            ("DNS".to_string(), aggregate(9, 1, 2)),
            ("TCP".to_string(), aggregate(7, 3, 2)),
            ("UDP".to_string(), aggregate(8, 2, 2)),
        ]);

        let ranking = topic_ranking(&topics);
        let names: Vec<_> = ranking.iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(names, vec!["TCP", "UDP", "DNS"]);
        assert_eq!(ranking[0].total_questions, 10);
        assert_eq!(ranking[0].sessions_with_topic, 2);
        assert!((ranking[0].accuracy_pct - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ranking_ties_keep_name_order_and_round_to_even() {
        let topics = BTreeMap::from([
            ("b".to_string(), aggregate(1, 15, 1)),
            ("a".to_string(), aggregate(2, 30, 1)),
            ("c".to_string(), aggregate(0, 0, 1)),
        ]);

        let ranking = topic_ranking(&topics);
        let names: Vec<_> = ranking.iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert!((ranking[1].accuracy_pct - 6.2).abs() < 1e-12);
    }

    #[test]
    fn score_is_out_of_ten() {
        assert!((session_score(&session(8, 2, 0.0)) - 8.0).abs() < f64::EPSILON);
        assert!((session_score(&session(2, 1, 0.0)) - 6.67).abs() < 1e-12);
        assert!(session_score(&session(0, 0, 0.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_of_three_sessions() {
        let summary = session_summary(&[
            session(8, 2, 100.0),
            session(7, 3, 120.0),
            session(9, 1, 90.0),
        ]);

        assert_eq!(summary.total_sessions, 3);
        assert_eq!(summary.total_questions_answered, 30);
        assert_eq!((summary.total_correct, summary.total_wrong), (24, 6));
        assert!((summary.average_score - 8.0).abs() < 1e-12);
        assert!((summary.best_score - 9.0).abs() < f64::EPSILON);
        assert!((summary.worst_score - 7.0).abs() < f64::EPSILON);
        assert!((summary.total_study_time - 310.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let summary = session_summary(&[]);
        assert_eq!(summary.total_sessions, 0);
        assert!(summary.average_score.abs() < f64::EPSILON);
        assert!(summary.best_score.abs() < f64::EPSILON);
        assert!(summary.worst_score.abs() < f64::EPSILON);
    }
}
