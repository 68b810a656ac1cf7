//! Topic review priority.
//!
//! A topic whose outcomes are most uncertain (accuracy near 50%) carries the
//! most information per review, so it ranks highest. Repeated exposure lowers
//! the priority of an equally uncertain topic.

/// Lower and upper clamp on the accuracy ratio, keeping `log2` finite.
const MIN_P: f64 = 0.01;
const MAX_P: f64 = 0.99;

/// Binary Shannon entropy (bits) of a topic's correct/wrong split.
///
/// Returns 0 when `total` is 0. Otherwise lies in roughly `[0.08, 1.0]`,
/// peaking at an even split.
#[allow(clippy::cast_precision_loss)]
pub fn entropy(correct: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = (correct as f64 / total as f64).clamp(MIN_P, MAX_P);
    let q = 1.0 - p;
    -(p * p.log2() + q * q.log2())
}

/// Review priority: entropy spread over exposures.
///
/// Unseen topics (`exposures == 0`) get double weight.
pub fn priority_index(entropy: f64, exposures: u32) -> f64 {
    if exposures == 0 {
        return entropy * 2.0;
    }
    entropy / f64::from(exposures)
}
