//! Display formatting for the navigation banner and bottom bar

use alloc::format;
use alloc::string::String;

use libm::{floor, round};

/// Format a duration as `"{m} min(s) {s}s"`
///
/// Negative and non-finite durations render as zero.
pub fn format_duration(total_seconds: f64) -> String {
    let total = if total_seconds.is_finite() && total_seconds > 0.0 {
        total_seconds
    } else {
        0.0
    };
    let minutes = floor(total / 60.0) as u64;
    let seconds = floor(total % 60.0) as u64;
    let plural = if minutes != 1 { "s" } else { "" };
    format!("{minutes} min{plural} {seconds}s")
}

/// Format a whole-route distance in kilometers with one decimal
pub fn format_route_distance(meters: f64) -> String {
    format!("{:.1} km", meters.max(0.0) / 1000.0)
}

/// Format a distance to the next maneuver
///
/// Below 1 km the value is rounded to the nearest 10 m.
pub fn format_step_distance(meters: f64) -> String {
    let meters = meters.max(0.0);
    if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{} m", round(meters / 10.0) as i64 * 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(65.0), "1 min 5s");
        assert_eq!(format_duration(120.0), "2 mins 0s");
        assert_eq!(format_duration(59.9), "0 mins 59s");
        assert_eq!(format_duration(3725.4), "62 mins 5s");
    }

    #[test]
    fn test_format_duration_degenerate() {
        assert_eq!(format_duration(-3.0), "0 mins 0s");
        assert_eq!(format_duration(f64::NAN), "0 mins 0s");
    }

    #[test]
    fn test_format_route_distance() {
        assert_eq!(format_route_distance(1234.0), "1.2 km");
        assert_eq!(format_route_distance(0.0), "0.0 km");
    }

    #[test]
    fn test_format_step_distance() {
        assert_eq!(format_step_distance(150.0), "150 m");
        assert_eq!(format_step_distance(5.0), "10 m");
        assert_eq!(format_step_distance(2500.0), "2.5 km");
    }
}
