//! Human-readable time formatting.

/// Formats seconds as a compact duration.
///
/// Returns "Ns" under a minute, "Mm" or "Mm Ss" under an hour, and "Hh" or
/// "Hh Mm" beyond. Fractions are truncated. Negative durations are treated as
/// 0s.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(seconds: f64) -> String {
    if seconds.is_nan() || seconds <= 0.0 {
        return "0s".to_string();
    }
    let total = seconds as u64;
    if total < 60 {
        return format!("{total}s");
    }

    let minutes = total / 60;
    let remaining_seconds = total % 60;
    if minutes < 60 {
        if remaining_seconds > 0 {
            return format!("{minutes}m {remaining_seconds}s");
        }
        return format!("{minutes}m");
    }

    let hours = minutes / 60;
    let remaining_minutes = minutes % 60;
    if remaining_minutes > 0 {
        format!("{hours}h {remaining_minutes}m")
    } else {
        format!("{hours}h")
    }
}

/// Formats an interval in hours as "Review now", minutes, hours or days.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_interval(hours: f64) -> String {
    if hours.is_nan() || hours <= 0.0 {
        return "Review now".to_string();
    }
    if hours < 1.0 {
        let minutes = (hours * 60.0) as u64;
        return format!("{minutes} {}", plural(minutes, "minute"));
    }
    if hours < 24.0 {
        let h = hours as u64;
        return format!("{h} {}", plural(h, "hour"));
    }
    let days = (hours / 24.0) as u64;
    format!("{days} {}", plural(days, "day"))
}

/// Appends an "s" to `unit` unless `n` is exactly one.
pub(crate) fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}
