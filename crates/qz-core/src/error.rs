//! Validation errors for model parameters.

use thiserror::Error;

/// Errors raised when constructing model parameters.
///
/// The numeric functions themselves never fail; these only guard the
/// tunable parameters a caller may override.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// The decay constant must be a positive, finite rate.
    #[error("decay constant must be positive and finite, got {value}")]
    InvalidDecayConstant { value: f64 },

    /// The target retention must be a probability above zero.
    #[error("target retention must be in (0.0, 1.0], got {value}")]
    InvalidTargetRetention { value: f64 },

    /// Classification thresholds are out of range or inverted.
    #[error(
        "retention thresholds must satisfy 0 <= at-risk ({at_risk_below}) <= mastered ({mastered_at}) <= 100"
    )]
    InvalidThresholds { at_risk_below: f64, mastered_at: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_include_value() {
        let err = ModelError::InvalidDecayConstant { value: -1.0 };
        assert_eq!(
            err.to_string(),
            "decay constant must be positive and finite, got -1"
        );

        let err = ModelError::InvalidTargetRetention { value: 1.5 };
        assert_eq!(
            err.to_string(),
            "target retention must be in (0.0, 1.0], got 1.5"
        );
    }
}
