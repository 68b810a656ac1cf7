//! Statistical primitives.
//!
//! Leaf numeric helpers shared by the prediction model: the error function,
//! the standard normal CDF, and squared logarithmic error terms.

use std::f64::consts::SQRT_2;

// Abramowitz & Stegun 7.1.26 coefficients.
const A1: f64 = 0.254_829_592;
const A2: f64 = -0.284_496_736;
const A3: f64 = 1.421_413_741;
const A4: f64 = -1.453_152_027;
const A5: f64 = 1.061_405_429;
const P: f64 = 0.327_591_1;

/// Error function via the Abramowitz–Stegun rational approximation.
///
/// Maximum absolute error is about 1.5e-7. The approximation is evaluated on
/// `|x|` and the sign of `x` is restored afterwards, so `erf(-x) == -erf(x)`
/// holds exactly.
pub fn erf(x: f64) -> f64 {
    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = x.abs();

    let t = 1.0 / P.mul_add(x, 1.0);
    let poly = ((((A5 * t + A4) * t) + A3) * t + A2) * t + A1;
    let y = 1.0 - poly * t * (-x * x).exp();

    sign * y
}

/// Standard normal cumulative distribution function.
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// One squared logarithmic error term: `(ln(1+actual) - ln(1+predicted))^2`.
///
/// Both arguments must be `>= -1`; callers pass non-negative counts.
pub fn msle_term(actual: f64, predicted: f64) -> f64 {
    let diff = actual.ln_1p() - predicted.ln_1p();
    diff * diff
}

/// Mean squared logarithmic error over `(actual, predicted)` pairs.
///
/// `count` is the denominator, which may exceed the number of pairs when
/// some observations contribute a zero term. Returns 0 when `count` is 0.
#[allow(clippy::cast_precision_loss)]
pub fn mean_msle<I>(pairs: I, count: usize) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    if count == 0 {
        return 0.0;
    }
    let sum: f64 = pairs
        .into_iter()
        .map(|(actual, predicted)| msle_term(actual, predicted))
        .sum();
    sum / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erf_is_zero_at_origin() {
        assert!(erf(0.0).abs() < 1e-8);
    }

    #[test]
    fn erf_is_odd() {
        for x in [0.1, 0.5, 1.0, 2.3, 4.0] {
            assert!((erf(-x) + erf(x)).abs() < 1e-12, "erf not odd at {x}");
        }
    }

    #[test]
    fn erf_matches_reference_values() {
        // Reference values of the exact function; error bound is 1.5e-7.
        assert!((erf(0.5) - 0.520_499_877_8).abs() < 2e-7);
        assert!((erf(1.0) - 0.842_700_792_9).abs() < 2e-7);
        assert!((erf(2.0) - 0.995_322_265_0).abs() < 2e-7);
    }

    #[test]
    fn erf_approaches_one() {
        assert!((erf(6.0) - 1.0).abs() < 1e-7);
        assert!((erf(-6.0) + 1.0).abs() < 1e-7);
    }

    #[test]
    fn normal_cdf_at_zero_is_half() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-8);
    }

    #[test]
    fn normal_cdf_is_symmetric() {
        for x in [0.25, 0.75, 1.0, 1.396, 2.5, 3.0] {
            let total = normal_cdf(x) + normal_cdf(-x);
            assert!((total - 1.0).abs() < 1e-6, "asymmetric at {x}: {total}");
        }
    }

    #[test]
    fn normal_cdf_is_monotonic() {
        let mut prev = normal_cdf(-6.0);
        for step in -59..=60 {
            let x = f64::from(step) / 10.0;
            let value = normal_cdf(x);
            assert!(value >= prev, "cdf decreased at {x}");
            prev = value;
        }
    }

    #[test]
    fn normal_cdf_known_points() {
        assert!((normal_cdf(1.0) - 0.841_344_7).abs() < 1e-6);
        assert!((normal_cdf(-1.396) - 0.081_357).abs() < 1e-5);
    }

    #[test]
    fn msle_term_zero_for_exact_prediction() {
        assert!(msle_term(7.0, 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn msle_term_uses_log1p() {
        let expected = (2.0_f64.ln() - 1.0_f64.ln()).powi(2);
        assert!((msle_term(1.0, 0.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn mean_msle_handles_empty_and_padding() {
        assert!(mean_msle(std::iter::empty(), 0).abs() < f64::EPSILON);

        let one = msle_term(8.0, 7.0);
        let mean = mean_msle([(8.0, 7.0)], 2);
        assert!((mean - one / 2.0).abs() < 1e-12);
    }
}
