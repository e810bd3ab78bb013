//! Playback time formatting.

/// Label shown before metadata is known.
pub const ZERO_TIME: &str = "0:00";

/// Format seconds as `m:ss`. Unknown (NaN or infinite) times give `"0:00"`;
/// negatives clamp to zero.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return ZERO_TIME.to_string();
    }
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Playback position as a percentage of `duration`; 0 when the ratio is
/// undefined (duration unknown or zero).
pub fn progress_percent(current_time: f64, duration: f64) -> f64 {
    let percent = current_time / duration * 100.0;
    if percent.is_finite() { percent } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.99), "0:59");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(3725.4), "62:05");
    }

    #[test]
    fn unknown_time_is_placeholder() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }

    #[test]
    fn percent_of_duration() {
        assert_eq!(progress_percent(50.0, 200.0), 25.0);
        assert_eq!(progress_percent(200.0, 200.0), 100.0);
    }

    #[test]
    fn percent_guards_unknown_duration() {
        assert_eq!(progress_percent(0.0, f64::NAN), 0.0);
        assert_eq!(progress_percent(3.0, 0.0), 0.0);
        assert_eq!(progress_percent(0.0, 0.0), 0.0);
        assert_eq!(progress_percent(1.0, f64::INFINITY), 0.0);
    }
}
