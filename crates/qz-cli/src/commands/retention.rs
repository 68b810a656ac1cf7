//! Retention command: per-topic forgetting-curve report.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use qz_core::{
    ForgettingCurve, RetentionReport, RetentionThresholds, TopicAnalysis, format_interval,
    retention_report,
};
use serde::Serialize;

use crate::history::QuizHistory;

/// Retention report with quiz context.
#[derive(Debug, Serialize)]
pub struct RetentionOutput {
    pub quiz: String,
    pub total_sessions: usize,
    #[serde(flatten)]
    pub report: RetentionReport,
}

/// Builds the retention report for `history` at `now`.
pub fn generate(
    history: &QuizHistory,
    now: DateTime<Utc>,
    curve: &ForgettingCurve,
    thresholds: &RetentionThresholds,
) -> Result<RetentionOutput> {
    let total_sessions = history.completed_sessions().len();
    if total_sessions == 0 {
        anyhow::bail!("No completed sessions found");
    }

    let report = retention_report(&history.topic_aggregates(now), now, curve, thresholds);

    Ok(RetentionOutput {
        quiz: history.name().to_string(),
        total_sessions,
        report,
    })
}

fn write_topic_line(output: &mut String, topic: &TopicAnalysis) {
    writeln!(
        output,
        "  {:<20}  {:>5.1}%  acc {:>5.1}%  {:>3}d ago  review: {}",
        topic.topic,
        topic.retention_pct,
        topic.accuracy_pct,
        topic.days_since_review,
        format_interval(topic.hours_until_review)
    )
    .unwrap();
}

fn write_section(output: &mut String, title: &str, topics: &[TopicAnalysis]) {
    writeln!(output).unwrap();
    writeln!(output, "{title}").unwrap();
    writeln!(output, "{}", "─".repeat(title.chars().count())).unwrap();
    if topics.is_empty() {
        writeln!(output, "(none)").unwrap();
    }
    for topic in topics {
        write_topic_line(output, topic);
    }
}

/// Formats the human-readable retention report.
pub fn format_retention(data: &RetentionOutput, thresholds: &RetentionThresholds) -> String {
    let mut output = String::new();
    let report = &data.report;

    writeln!(output, "RETENTION REPORT: {}", data.quiz).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Sessions:          {}", data.total_sessions).unwrap();
    writeln!(output, "Answers:           {}", report.total_questions).unwrap();
    writeln!(output, "Overall accuracy:  {:.1}%", report.overall_accuracy_pct).unwrap();
    writeln!(output, "Overall retention: {:.1}%", report.overall_retention_pct).unwrap();

    write_section(
        &mut output,
        &format!("AT RISK (< {}%)", thresholds.at_risk_below()),
        &report.at_risk,
    );
    write_section(
        &mut output,
        &format!("MASTERED (>= {}%)", thresholds.mastered_at()),
        &report.mastered,
    );
    write_section(&mut output, "ALL TOPICS", &report.all_topics);

    output
}

/// Runs the retention command.
pub fn run<W: Write>(
    writer: &mut W,
    history: &QuizHistory,
    now: DateTime<Utc>,
    curve: &ForgettingCurve,
    thresholds: &RetentionThresholds,
    json: bool,
) -> Result<()> {
    let data = generate(history, now, curve, thresholds)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&data)?)?;
    } else {
        write!(writer, "{}", format_retention(&data, thresholds))?;
    }

    Ok(())
}
