//! Review schedule generation.
//!
//! Orders analyzed topics into a study plan, most urgent first, and labels
//! each with when to review it next.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::format::plural;
use crate::topic::TopicAnalysis;

/// Urgency bucket of a scheduled review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PriorityTier {
    /// Retention is already at or below target.
    High,
    /// Due within a day.
    Medium,
    /// Due in a day or more.
    Low,
}

impl PriorityTier {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the study plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleItem {
    pub topic: String,
    pub retention_pct: f64,
    pub next_review: String,
    pub priority: PriorityTier,
}

/// Builds the study plan from topic analyses.
///
/// Topics are ordered by ascending retention, ties broken by descending
/// priority index; the sort is stable so equal topics keep input order.
pub fn generate_schedule(analyses: &[TopicAnalysis]) -> Vec<ScheduleItem> {
    let mut sorted: Vec<&TopicAnalysis> = analyses.iter().collect();
    sorted.sort_by(|a, b| urgency_order(a, b));

    sorted
        .into_iter()
        .map(|analysis| {
            let (next_review, priority) = review_slot(analysis.hours_until_review);
            ScheduleItem {
                topic: analysis.topic.clone(),
                retention_pct: analysis.retention_pct,
                next_review,
                priority,
            }
        })
        .collect()
}

fn urgency_order(a: &TopicAnalysis, b: &TopicAnalysis) -> Ordering {
    a.retention_pct
        .total_cmp(&b.retention_pct)
        .then_with(|| b.priority_index.total_cmp(&a.priority_index))
}

/// Label and tier for a review due in `hours`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn review_slot(hours: f64) -> (String, PriorityTier) {
    if hours.is_nan() || hours <= 0.0 {
        return ("Review now".to_string(), PriorityTier::High);
    }
    if hours < 24.0 {
        let h = hours as u64;
        return (format!("In {h} {}", plural(h, "hour")), PriorityTier::Medium);
    }
    let days = (hours / 24.0) as u64;
    (format!("In {days} {}", plural(days, "day")), PriorityTier::Low)
}
