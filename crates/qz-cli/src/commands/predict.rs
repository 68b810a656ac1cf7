//! Predict command: exam outcome plus a study plan.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use qz_core::{
    ForgettingCurve, Prediction, ScheduleItem, Trend, analyze_topics, calculate_trend,
    generate_schedule, predict_performance,
};
use serde::Serialize;

use crate::commands::schedule::write_plan;
use crate::commands::util::round1;
use crate::history::QuizHistory;

/// Target exam parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exam {
    pub questions: u32,
    pub min_score: f64,
}

impl Exam {
    /// Validates the exam shape: at least one question and a reachable score.
    pub fn new(questions: u32, min_score: f64) -> Result<Self> {
        if questions == 0 {
            anyhow::bail!("exam must have at least one question");
        }
        if !(1.0..=f64::from(questions)).contains(&min_score) {
            anyhow::bail!("minimum score must be between 1 and {questions}, got {min_score}");
        }
        Ok(Self {
            questions,
            min_score,
        })
    }
}

/// Computed prediction output.
#[derive(Debug, Serialize)]
pub struct PredictionReport {
    pub quiz: String,
    pub exam_questions: u32,
    pub min_score: f64,
    #[serde(flatten)]
    pub prediction: Prediction,
    pub trend: Trend,
    pub topics_retention: BTreeMap<String, f64>,
    pub study_schedule: Vec<ScheduleItem>,
}

/// Builds the prediction report for `history` at `now`.
pub fn generate(
    history: &QuizHistory,
    exam: Exam,
    now: DateTime<Utc>,
    curve: &ForgettingCurve,
) -> Result<PredictionReport> {
    let sessions = history.completed_sessions();
    if sessions.is_empty() {
        anyhow::bail!("No completed sessions found. Complete some study sessions first.");
    }

    let mut prediction = predict_performance(&sessions, exam.questions, exam.min_score);
    prediction.pass_probability = round1(prediction.pass_probability);
    prediction.accuracy_pct = round1(prediction.accuracy_pct);

    let accuracy_series: Vec<f64> = sessions
        .iter()
        .filter_map(|s| s.accuracy())
        .map(|a| a * 100.0)
        .collect();
    let trend = calculate_trend(&accuracy_series);

    let analyses = analyze_topics(&history.topic_aggregates(now), now, curve);
    let topics_retention = analyses
        .iter()
        .map(|a| (a.topic.clone(), a.retention_pct))
        .collect();
    let study_schedule = generate_schedule(&analyses);

    Ok(PredictionReport {
        quiz: history.name().to_string(),
        exam_questions: exam.questions,
        min_score: exam.min_score,
        prediction,
        trend,
        topics_retention,
        study_schedule,
    })
}

/// Formats the human-readable prediction.
pub fn format_prediction(report: &PredictionReport) -> String {
    let mut output = String::new();
    let p = &report.prediction;

    writeln!(output, "EXAM PREDICTION: {}", report.quiz).unwrap();
    writeln!(output).unwrap();
    writeln!(
        output,
        "Exam:              {} questions, pass at {}",
        report.exam_questions, report.min_score
    )
    .unwrap();
    writeln!(
        output,
        "Predicted correct: {} / {}",
        p.predicted_correct, report.exam_questions
    )
    .unwrap();
    writeln!(output, "Predicted time:    {}", p.predicted_time).unwrap();
    writeln!(output, "Pass probability:  {:.1}%", p.pass_probability).unwrap();
    writeln!(
        output,
        "Accuracy:          {:.1}% ({})",
        p.accuracy_pct, report.trend
    )
    .unwrap();

    writeln!(output).unwrap();
    write_plan(&mut output, &report.study_schedule);

    output
}

/// Runs the predict command.
pub fn run<W: Write>(
    writer: &mut W,
    history: &QuizHistory,
    exam: Exam,
    now: DateTime<Utc>,
    curve: &ForgettingCurve,
    json: bool,
) -> Result<()> {
    let report = generate(history, exam, now, curve)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_prediction(&report))?;
    }

    Ok(())
}
