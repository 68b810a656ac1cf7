//! Direction of a performance series.

use std::fmt;

use serde::Serialize;

/// Slope magnitude below which a series counts as flat.
const SLOPE_THRESHOLD: f64 = 0.1;

/// Direction of a series of measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        };
        write!(f, "{s}")
    }
}

/// Classifies a series by its least-squares slope over the point index.
///
/// Fewer than two points is [`Trend::Stable`].
#[allow(clippy::cast_precision_loss)]
pub fn calculate_trend(points: &[f64]) -> Trend {
    if points.len() < 2 {
        return Trend::Stable;
    }

    let n = points.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = points.iter().sum::<f64>() / n;

    let (numerator, denominator) = points
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, y)| {
            let dx = i as f64 - x_mean;
            (num + dx * (y - y_mean), den + dx * dx)
        });

    if denominator <= f64::EPSILON {
        return Trend::Stable;
    }

    let slope = numerator / denominator;
    if slope > SLOPE_THRESHOLD {
        Trend::Improving
    } else if slope < -SLOPE_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}
