//! Ebbinghaus forgetting-curve model.
//!
//! Retention decays exponentially with the hours elapsed since the last
//! review: `R(t) = accuracy * e^(-λt)`. The inverse tells how long until
//! retention falls to a target level, which drives the review schedule.

use crate::error::ModelError;

/// Decay rate λ per elapsed hour.
///
/// At this rate modeled retention halves after roughly 58 days
/// (`ln 2 / λ ≈ 1386` hours). Recalibrate here, or override per call with
/// [`ForgettingCurve::new`].
pub const DEFAULT_DECAY_CONSTANT: f64 = 0.0005;

/// Retention level at which a topic is due for review.
pub const DEFAULT_TARGET_RETENTION: f64 = 0.85;

/// Parameters of the forgetting curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForgettingCurve {
    /// Exponential decay rate per hour.
    decay_constant: f64,

    /// Retention level that triggers a review.
    target_retention: f64,
}

impl Default for ForgettingCurve {
    fn default() -> Self {
        Self {
            decay_constant: DEFAULT_DECAY_CONSTANT,
            target_retention: DEFAULT_TARGET_RETENTION,
        }
    }
}

impl ForgettingCurve {
    /// Creates a curve after validating both parameters.
    pub fn new(decay_constant: f64, target_retention: f64) -> Result<Self, ModelError> {
        if !decay_constant.is_finite() || decay_constant <= 0.0 {
            return Err(ModelError::InvalidDecayConstant {
                value: decay_constant,
            });
        }
        if !(target_retention > 0.0 && target_retention <= 1.0) {
            return Err(ModelError::InvalidTargetRetention {
                value: target_retention,
            });
        }
        Ok(Self {
            decay_constant,
            target_retention,
        })
    }

    pub const fn decay_constant(&self) -> f64 {
        self.decay_constant
    }

    pub const fn target_retention(&self) -> f64 {
        self.target_retention
    }

    /// Modeled retention after `hours_elapsed` hours.
    pub fn retention_rate(&self, accuracy: f64, hours_elapsed: f64) -> f64 {
        retention_rate(accuracy, hours_elapsed, self.decay_constant)
    }

    /// Hours until `current_retention` decays to the target.
    pub fn hours_until_target(&self, current_retention: f64) -> f64 {
        hours_until_target(current_retention, self.target_retention, self.decay_constant)
    }
}

/// Retention under exponential decay: `accuracy * e^(-decay_constant * hours)`.
///
/// Equals `accuracy` at zero elapsed time and tends to 0 as time grows.
pub fn retention_rate(accuracy: f64, hours_elapsed: f64, decay_constant: f64) -> f64 {
    accuracy * (-decay_constant * hours_elapsed).exp()
}

/// Hours until retention decays from `current_retention` to `target_retention`.
///
/// Returns 0 when retention is already at or below the target (review now)
/// or is not positive.
pub fn hours_until_target(current_retention: f64, target_retention: f64, decay_constant: f64) -> f64 {
    if current_retention <= 0.0 || current_retention <= target_retention {
        return 0.0;
    }
    -(target_retention / current_retention).ln() / decay_constant
}
