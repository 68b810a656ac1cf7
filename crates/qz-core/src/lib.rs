//! Analytics engine for quiz study sessions.
//!
//! This crate contains the statistical models for:
//! - Prediction: pass probability for an upcoming exam from session history
//! - Retention: per-topic forgetting-curve estimates and review priority
//! - Scheduling: ordering topics into a review plan
//! - Summaries: topic accuracy ranking and session score spread
//!
//! All functions are pure. The current time is always passed in by the
//! caller, so repeated calls with the same inputs give identical results.

mod error;
pub mod forgetting;
pub mod format;
mod prediction;
pub mod priority;
pub mod report;
mod schedule;
pub mod stats;
pub mod summary;
pub mod topic;
pub mod trend;

pub use error::ModelError;
pub use forgetting::{DEFAULT_DECAY_CONSTANT, DEFAULT_TARGET_RETENTION, ForgettingCurve};
pub use format::{format_interval, format_time};
pub use prediction::{Prediction, SessionAggregate, pass_probability, predict_performance};
pub use report::{RetentionReport, RetentionThresholds, retention_report};
pub use schedule::{PriorityTier, ScheduleItem, generate_schedule};
pub use summary::{SessionSummary, TopicStanding, session_score, session_summary, topic_ranking};
pub use topic::{
    TopicAggregate, TopicAnalysis, TopicResult, aggregate_topics, analyze_topic, analyze_topics,
};
pub use trend::{Trend, calculate_trend};
