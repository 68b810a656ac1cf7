//! Retention report across a quiz's topics.
//!
//! Classifies analyzed topics as at risk or mastered. The thresholds are
//! reporting policy and can be overridden per call.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ModelError;
use crate::forgetting::ForgettingCurve;
use crate::topic::{TopicAggregate, TopicAnalysis, analyze_topics, round_to};

/// Retention percentages that separate at-risk and mastered topics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetentionThresholds {
    /// Topics with retention strictly below this are at risk.
    at_risk_below: f64,

    /// Topics with retention at or above this are mastered.
    mastered_at: f64,
}

impl Default for RetentionThresholds {
    fn default() -> Self {
        Self {
            at_risk_below: 50.0,
            mastered_at: 70.0,
        }
    }
}

impl RetentionThresholds {
    /// Creates thresholds, requiring `0 <= at_risk_below <= mastered_at <= 100`.
    pub fn new(at_risk_below: f64, mastered_at: f64) -> Result<Self, ModelError> {
        let valid = (0.0..=100.0).contains(&at_risk_below)
            && (0.0..=100.0).contains(&mastered_at)
            && at_risk_below <= mastered_at;
        if !valid {
            return Err(ModelError::InvalidThresholds {
                at_risk_below,
                mastered_at,
            });
        }
        Ok(Self {
            at_risk_below,
            mastered_at,
        })
    }

    pub const fn at_risk_below(&self) -> f64 {
        self.at_risk_below
    }

    pub const fn mastered_at(&self) -> f64 {
        self.mastered_at
    }

    fn is_at_risk(&self, analysis: &TopicAnalysis) -> bool {
        analysis.retention_pct < self.at_risk_below
    }

    fn is_mastered(&self, analysis: &TopicAnalysis) -> bool {
        analysis.retention_pct >= self.mastered_at
    }
}

/// Retention overview of a quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetentionReport {
    /// Answers recorded across all topics.
    pub total_questions: u64,

    /// Accuracy over all topic answers, in percent.
    pub overall_accuracy_pct: f64,

    /// Mean topic retention, in percent.
    pub overall_retention_pct: f64,

    /// Topics below the at-risk threshold, weakest first.
    pub at_risk: Vec<TopicAnalysis>,

    /// Topics at or above the mastery threshold, strongest first.
    pub mastered: Vec<TopicAnalysis>,

    /// Every topic, weakest first.
    pub all_topics: Vec<TopicAnalysis>,
}

/// Analyzes every topic at `now` and summarizes retention.
#[allow(clippy::cast_precision_loss)]
pub fn retention_report(
    topics: &BTreeMap<String, TopicAggregate>,
    now: DateTime<Utc>,
    curve: &ForgettingCurve,
    thresholds: &RetentionThresholds,
) -> RetentionReport {
    let mut all_topics = analyze_topics(topics, now, curve);
    all_topics.sort_by(|a, b| a.retention_pct.total_cmp(&b.retention_pct));

    let at_risk: Vec<_> = all_topics
        .iter()
        .filter(|a| thresholds.is_at_risk(a))
        .cloned()
        .collect();
    let mut mastered: Vec<_> = all_topics
        .iter()
        .filter(|a| thresholds.is_mastered(a))
        .cloned()
        .collect();
    mastered.sort_by(|a, b| b.retention_pct.total_cmp(&a.retention_pct));

    let total_correct: u64 = topics.values().map(|t| t.correct).sum();
    let total_questions: u64 = topics.values().map(TopicAggregate::total).sum();
    let overall_accuracy_pct = if total_questions > 0 {
        round_to(total_correct as f64 / total_questions as f64 * 100.0, 1)
    } else {
        0.0
    };

    let overall_retention_pct = if all_topics.is_empty() {
        0.0
    } else {
        let sum: f64 = all_topics.iter().map(|a| a.retention_pct).sum();
        round_to(sum / all_topics.len() as f64, 1)
    };

    tracing::debug!(
        topics = all_topics.len(),
        at_risk = at_risk.len(),
        mastered = mastered.len(),
        overall_retention_pct,
        "built retention report"
    );

    RetentionReport {
        total_questions,
        overall_accuracy_pct,
        overall_retention_pct,
        at_risk,
        mastered,
        all_topics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    fn topics() -> BTreeMap<String, TopicAggregate> {
        let entry = |correct, wrong, exposures, hours_ago| TopicAggregate {
            correct,
            wrong,
            exposures,
            last_reviewed_at: now() - Duration::hours(hours_ago),
        };
        BTreeMap::from([
            ("TCP".to_string(), entry(5, 5, 2, 48)),   // 48.8
            ("DNS".to_string(), entry(9, 1, 3, 2)),    // 89.9
            ("UDP".to_string(), entry(3, 7, 1, 200)),  // 27.1
            ("HTTP".to_string(), entry(10, 0, 4, 30)), // 98.5
            ("ARP".to_string(), entry(6, 4, 1, 0)),    // 60.0
        ])
    }

    fn names(analyses: &[TopicAnalysis]) -> Vec<&str> {
        analyses.iter().map(|a| a.topic.as_str()).collect()
    }

    #[test]
    fn classifies_and_orders_topics() {
        let report = retention_report(
            &topics(),
            now(),
            &ForgettingCurve::default(),
            &RetentionThresholds::default(),
        );

        assert_eq!(names(&report.all_topics), vec!["UDP", "TCP", "ARP", "DNS", "HTTP"]);
        assert_eq!(names(&report.at_risk), vec!["UDP", "TCP"]);
        assert_eq!(names(&report.mastered), vec!["HTTP", "DNS"]);
    }

    #[test]
    fn summarizes_totals() {
        let report = retention_report(
            &topics(),
            now(),
            &ForgettingCurve::default(),
            &RetentionThresholds::default(),
        );

        assert_eq!(report.total_questions, 50);
        assert!((report.overall_accuracy_pct - 66.0).abs() < 1e-9);
        // (27.1 + 48.8 + 60.0 + 89.9 + 98.5) / 5 = 64.86
        assert!((report.overall_retention_pct - 64.9).abs() < 1e-9);
    }

    #[test]
    fn custom_thresholds_change_classification() {
        let thresholds = RetentionThresholds::new(30.0, 95.0).unwrap();
        let report = retention_report(&topics(), now(), &ForgettingCurve::default(), &thresholds);

        assert_eq!(names(&report.at_risk), vec!["UDP"]);
        assert_eq!(names(&report.mastered), vec!["HTTP"]);
    }

    #[test]
    fn empty_topics_report_zeroes() {
        let report = retention_report(
            &BTreeMap::new(),
            now(),
            &ForgettingCurve::default(),
            &RetentionThresholds::default(),
        );
        assert_eq!(report.total_questions, 0);
        assert!(report.overall_retention_pct.abs() < f64::EPSILON);
        assert!(report.all_topics.is_empty());
    }

    #[test]
    fn thresholds_validate_range() {
        assert!(RetentionThresholds::new(50.0, 70.0).is_ok());
        assert!(RetentionThresholds::new(60.0, 60.0).is_ok());
        assert_eq!(
            RetentionThresholds::new(80.0, 70.0),
            Err(ModelError::InvalidThresholds {
                at_risk_below: 80.0,
                mastered_at: 70.0
            })
        );
        assert!(RetentionThresholds::new(-1.0, 70.0).is_err());
        assert!(RetentionThresholds::new(50.0, 101.0).is_err());
    }
}
