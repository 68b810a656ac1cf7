//! Topics command: accuracy ranking and session score summary.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use qz_core::{SessionSummary, TopicStanding, format_time, session_summary, topic_ranking};
use serde::Serialize;

use crate::history::QuizHistory;

/// Topic ranking with session totals.
#[derive(Debug, Serialize)]
pub struct TopicsOutput {
    pub quiz: String,
    pub summary: SessionSummary,
    pub topics: Vec<TopicStanding>,
}

/// Builds the ranking for `history`.
///
/// `now` only dates topics whose sessions carry no completion time; the
/// ranking itself does not decay.
pub fn generate(history: &QuizHistory, now: DateTime<Utc>) -> Result<TopicsOutput> {
    let sessions = history.completed_sessions();
    if sessions.is_empty() {
        anyhow::bail!("No completed sessions found");
    }

    Ok(TopicsOutput {
        quiz: history.name().to_string(),
        summary: session_summary(&sessions),
        topics: topic_ranking(&history.topic_aggregates(now)),
    })
}

/// Formats the human-readable ranking.
pub fn format_topics(data: &TopicsOutput) -> String {
    let mut output = String::new();
    let summary = &data.summary;

    writeln!(output, "TOPICS: {}", data.quiz).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Sessions:       {}", summary.total_sessions).unwrap();
    writeln!(output, "Answers:        {}", summary.total_questions_answered).unwrap();
    writeln!(output, "Average score:  {:.2} / 10", summary.average_score).unwrap();
    writeln!(output, "Best score:     {:.2}", summary.best_score).unwrap();
    writeln!(output, "Worst score:    {:.2}", summary.worst_score).unwrap();
    writeln!(output, "Study time:     {}", format_time(summary.total_study_time)).unwrap();

    writeln!(output).unwrap();
    writeln!(output, "WEAKEST FIRST").unwrap();
    writeln!(output, "─────────────").unwrap();
    if data.topics.is_empty() {
        writeln!(output, "(no topic data)").unwrap();
    }
    for standing in &data.topics {
        let unit = if standing.sessions_with_topic == 1 {
            "session"
        } else {
            "sessions"
        };
        writeln!(
            output,
            "  {:<20}  {:>5.1}%  {:>4}/{:<4}  {} {unit}",
            standing.topic,
            standing.accuracy_pct,
            standing.correct,
            standing.total_questions,
            standing.sessions_with_topic
        )
        .unwrap();
    }

    output
}

/// Runs the topics command.
pub fn run<W: Write>(
    writer: &mut W,
    history: &QuizHistory,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let data = generate(history, now)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&data)?)?;
    } else {
        write!(writer, "{}", format_topics(&data))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use insta::assert_snapshot;

    use crate::commands::tests::sample_history;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn format_topics_output() {
        let data = generate(&sample_history(), now()).unwrap();
        assert_snapshot!(format_topics(&data), @r"
        TOPICS: Networking

        Sessions:       3
        Answers:        30
        Average score:  8.00 / 10
        Best score:     9.00
        Worst score:    7.00
        Study time:     5m 10s

        WEAKEST FIRST
        ─────────────
          TCP                    70.0%     7/10    2 sessions
          UDP                    80.0%     8/10    2 sessions
          DNS                    90.0%     9/10    2 sessions
        ");
    }

    #[test]
    fn incomplete_sessions_are_skipped() {
        let data = generate(&sample_history(), now()).unwrap();
        assert!(data.topics.iter().all(|t| t.topic != "ARP"));
        assert_eq!(data.summary.total_sessions, 3);
    }

    #[test]
    fn empty_history_errors() {
        let history = QuizHistory::parse("{}").unwrap();
        assert!(generate(&history, now()).is_err());
    }

    #[test]
    fn json_output_nests_summary() {
        let mut output = Vec::new();
        run(&mut output, &sample_history(), now(), true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["summary"]["best_score"], 9.0);
        assert_eq!(value["topics"][0]["topic"], "TCP");
        assert_eq!(value["topics"][0]["sessions_with_topic"], 2);
    }
}
