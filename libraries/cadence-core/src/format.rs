//! Clock formatting for a rendering layer

use std::time::Duration;

/// Format seconds as `mm:ss`
///
/// Rounds to the nearest second. Minutes are not wrapped into hours, so an
/// 80 minute mix renders as `80:00`. Non-finite or negative input renders as
/// `00:00`.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00".to_string();
    }

    let total = seconds.round() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format an optional duration, `00:00` when unknown
pub fn format_duration(duration: Option<Duration>) -> String {
    duration.map_or_else(|| format_clock(0.0), |d| format_clock(d.as_secs_f64()))
}
