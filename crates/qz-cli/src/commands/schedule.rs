//! Schedule command: the prioritized review plan.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use qz_core::{ForgettingCurve, ScheduleItem, analyze_topics, generate_schedule};

use crate::history::QuizHistory;

/// Builds the study plan for `history` at `now`.
pub fn generate(history: &QuizHistory, now: DateTime<Utc>, curve: &ForgettingCurve) -> Vec<ScheduleItem> {
    let analyses = analyze_topics(&history.topic_aggregates(now), now, curve);
    generate_schedule(&analyses)
}

/// Appends the "STUDY PLAN" section.
pub(crate) fn write_plan(output: &mut String, schedule: &[ScheduleItem]) {
    writeln!(output, "STUDY PLAN").unwrap();
    writeln!(output, "──────────").unwrap();

    if schedule.is_empty() {
        writeln!(output, "(no topic data)").unwrap();
        return;
    }

    for item in schedule {
        writeln!(
            output,
            "  {:<20}  {:>5.1}%  {:<12} {}",
            item.topic, item.retention_pct, item.next_review, item.priority
        )
        .unwrap();
    }
}

/// Runs the schedule command.
pub fn run<W: Write>(
    writer: &mut W,
    history: &QuizHistory,
    now: DateTime<Utc>,
    curve: &ForgettingCurve,
    json: bool,
) -> Result<()> {
    let schedule = generate(history, now, curve);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&schedule)?)?;
    } else {
        let mut output = String::new();
        write_plan(&mut output, &schedule);
        write!(writer, "{output}")?;
    }

    Ok(())
}
