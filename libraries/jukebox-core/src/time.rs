//! Time formatting for progress displays

/// Format seconds as `MM:SS`
///
/// NaN, infinite and negative input all render as `"00:00"`. Minutes are not
/// capped, so a 2 hour mix renders as `"120:00"`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }

    let minutes = (seconds / 60.0).floor() as u64;
    let remaining_seconds = (seconds % 60.0).floor() as u64;
    format!("{:02}:{:02}", minutes, remaining_seconds)
}
