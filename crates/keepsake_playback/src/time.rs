//! Playback time helpers.

/// Renders seconds as `m:ss`.
///
/// Negative or non-finite input renders as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Position as a fraction of duration in `[0, 1]`.
pub fn progress(position: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !position.is_finite() {
        return 0.0;
    }
    (position / duration).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(9.9), "0:09");
        assert_eq!(format_clock(75.0), "1:15");
        assert_eq!(format_clock(f64::NAN), "0:00");
    }

    #[test]
    fn test_progress_without_duration() {
        assert_eq!(progress(12.0, 0.0), 0.0);
        assert_eq!(progress(30.0, 60.0), 0.5);
    }
}
