//! Exam performance prediction.
//!
//! Treats an upcoming exam as independent Bernoulli trials at the learner's
//! observed accuracy and approximates the binomial with a continuity-corrected
//! normal distribution.
//!
//! # Calibration
//!
//! The pass probability is penalized by the mean squared logarithmic error
//! between each past session's actual and expected correct count, scaled by
//! the exam size. The penalty is a heuristic without a rigorous bound; large
//! values are absorbed by the final clamp to `[0, 100]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::format_time;
use crate::stats::{mean_msle, normal_cdf};

/// Outcome of one finished study session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAggregate {
    /// Questions answered correctly.
    #[serde(default)]
    pub correct: u32,

    /// Questions answered wrongly.
    #[serde(default)]
    pub wrong: u32,

    /// Total time spent, in seconds.
    #[serde(default)]
    pub time_spent: f64,

    /// When the session was completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl SessionAggregate {
    /// Number of answered questions.
    pub fn answered(&self) -> u64 {
        u64::from(self.correct) + u64::from(self.wrong)
    }

    /// Session accuracy as a ratio, or `None` when nothing was answered.
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> Option<f64> {
        let answered = self.answered();
        (answered > 0).then(|| f64::from(self.correct) / answered as f64)
    }
}

/// Predicted exam outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Expected number of correct answers on the exam.
    pub predicted_correct: u32,

    /// Expected time to finish the exam, formatted.
    pub predicted_time: String,

    /// Probability of reaching the passing score, in percent.
    pub pass_probability: f64,

    /// Historical accuracy, in percent.
    pub accuracy_pct: f64,

    /// Calibration penalty applied to the pass probability (as a fraction).
    pub error_adjustment: f64,
}

impl Prediction {
    /// Prediction used when there is no answer history.
    pub fn neutral() -> Self {
        Self {
            predicted_correct: 0,
            predicted_time: format_time(0.0),
            pass_probability: 0.0,
            accuracy_pct: 0.0,
            error_adjustment: 0.0,
        }
    }
}

/// Probability (percent) of scoring at least `min_score` on an exam.
///
/// The exam is modeled as `exam_questions` trials with success probability
/// `total_correct / total_questions`. Returns 0 without history. When the
/// observed accuracy is exactly 0 or 1 the variance vanishes and the result
/// is either 100 or 0. `error_adjustment` is subtracted (scaled to percent)
/// before clamping.
#[allow(clippy::cast_precision_loss)]
pub fn pass_probability(
    total_correct: u64,
    total_questions: u64,
    exam_questions: u32,
    min_score: f64,
    error_adjustment: f64,
) -> f64 {
    if total_questions == 0 {
        return 0.0;
    }

    let p = total_correct as f64 / total_questions as f64;
    let n = f64::from(exam_questions);
    let mean = p * n;
    let variance = n * p * (1.0 - p);

    if variance <= 0.0 {
        return if mean >= min_score { 100.0 } else { 0.0 };
    }

    let z = ((min_score - 0.5) - mean) / variance.sqrt();
    let probability = (1.0 - normal_cdf(z)) * 100.0 - error_adjustment * 100.0;

    probability.clamp(0.0, 100.0)
}

/// Predicts exam performance from a quiz's finished sessions.
///
/// Returns [`Prediction::neutral`] when there are no sessions or none of them
/// answered a question.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn predict_performance(
    sessions: &[SessionAggregate],
    exam_questions: u32,
    min_score: f64,
) -> Prediction {
    let total_correct: u64 = sessions.iter().map(|s| u64::from(s.correct)).sum();
    let total_questions: u64 = sessions.iter().map(SessionAggregate::answered).sum();

    if total_questions == 0 {
        return Prediction::neutral();
    }

    let total_time: f64 = sessions.iter().map(|s| s.time_spent).sum();
    let exam = f64::from(exam_questions);

    let accuracy = total_correct as f64 / total_questions as f64;
    let predicted_correct = (accuracy * exam).round_ties_even() as u32;
    let predicted_seconds = total_time / total_questions as f64 * exam;

    // Sessions without answers count towards the mean as zero terms.
    let msle = mean_msle(
        sessions.iter().filter(|s| s.answered() > 0).map(|s| {
            let expected = accuracy * s.answered() as f64;
            (f64::from(s.correct), expected)
        }),
        sessions.len(),
    );
    let error_adjustment = if exam_questions > 0 { msle / exam } else { 0.0 };

    let probability = pass_probability(
        total_correct,
        total_questions,
        exam_questions,
        min_score,
        error_adjustment,
    );

    tracing::debug!(
        sessions = sessions.len(),
        accuracy,
        msle,
        error_adjustment,
        probability,
        "predicted exam performance"
    );

    Prediction {
        predicted_correct,
        predicted_time: format_time(predicted_seconds),
        pass_probability: probability,
        accuracy_pct: accuracy * 100.0,
        error_adjustment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(correct: u32, wrong: u32, time_spent: f64) -> SessionAggregate {
        SessionAggregate {
            correct,
            wrong,
            time_spent,
            completed_at: None,
        }
    }

    fn three_sessions() -> Vec<SessionAggregate> {
        vec![
            session(8, 2, 100.0),
            session(7, 3, 120.0),
            session(9, 1, 90.0),
        ]
    }

    #[test]
    fn pass_probability_without_history_is_zero() {
        assert!(pass_probability(0, 0, 20, 14.0, 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pass_probability_perfect_history_is_certain() {
        for min_score in [1.0, 10.0, 20.0] {
            let p = pass_probability(30, 30, 20, min_score, 0.0);
            assert!((p - 100.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn pass_probability_zero_history_fails() {
        let p = pass_probability(0, 30, 20, 1.0, 0.0);
        assert!(p.abs() < f64::EPSILON);
    }

    #[test]
    fn pass_probability_continuity_corrected() {
        // mean 16, variance 3.2, z = (13.5 - 16) / 1.789
        let p = pass_probability(24, 30, 20, 14.0, 0.0);
        assert!((p - 91.887_469_5).abs() < 1e-5, "got {p}");
    }

    #[test]
    fn pass_probability_subtracts_adjustment() {
        let raw = pass_probability(24, 30, 20, 14.0, 0.0);
        let adjusted = pass_probability(24, 30, 20, 14.0, 0.05);
        assert!((raw - adjusted - 5.0).abs() < 1e-9);
    }

    #[test]
    fn pass_probability_clamps_large_adjustment() {
        let p = pass_probability(24, 30, 20, 14.0, 3.0);
        assert!(p.abs() < f64::EPSILON);
        let p = pass_probability(24, 30, 20, 1.0, -3.0);
        assert!((p - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn predict_empty_sessions_is_neutral() {
        let prediction = predict_performance(&[], 20, 14.0);
        assert_eq!(prediction, Prediction::neutral());
        assert_eq!(prediction.predicted_time, "0s");
    }

    #[test]
    fn predict_unanswered_sessions_is_neutral() {
        let sessions = vec![session(0, 0, 30.0), session(0, 0, 12.0)];
        assert_eq!(predict_performance(&sessions, 20, 14.0), Prediction::neutral());
    }

    #[test]
    fn predict_three_session_scenario() {
        let prediction = predict_performance(&three_sessions(), 20, 14.0);

        assert_eq!(prediction.predicted_correct, 16);
        assert_eq!(prediction.predicted_time, "3m 26s");
        assert!((prediction.accuracy_pct - 80.0).abs() < 1e-9);
        assert!(
            (prediction.pass_probability - 91.845_846_7).abs() < 1e-5,
            "got {}",
            prediction.pass_probability
        );
    }

    #[test]
    fn predict_adjustment_below_raw_probability() {
        let prediction = predict_performance(&three_sessions(), 20, 14.0);
        let raw = pass_probability(24, 30, 20, 14.0, 0.0);
        assert!(prediction.error_adjustment > 0.0);
        assert!(prediction.pass_probability < raw);
    }

    #[test]
    fn predict_consistent_sessions_have_no_adjustment() {
        let sessions = vec![session(8, 2, 60.0), session(8, 2, 60.0)];
        let prediction = predict_performance(&sessions, 10, 5.0);
        assert!(prediction.error_adjustment.abs() < 1e-12);
    }

    #[test]
    fn predict_rounds_half_to_even() {
        // accuracy 0.5 * 5 questions = 2.5
        let sessions = vec![session(1, 1, 10.0)];
        assert_eq!(predict_performance(&sessions, 5, 3.0).predicted_correct, 2);
    }

    #[test]
    fn session_accuracy() {
        assert_eq!(session(0, 0, 0.0).accuracy(), None);
        assert_eq!(session(3, 1, 0.0).accuracy(), Some(0.75));
    }

    #[test]
    fn session_deserializes_with_defaults() {
        let json = r#"{"correct": 4, "completed_at": "2026-01-10T10:00:00Z"}"#;
        let parsed: SessionAggregate = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.correct, 4);
        assert_eq!(parsed.wrong, 0);
        assert!(parsed.completed_at.is_some());
    }
}
