//! Shared 24-hour UTC axis
//!
//! Every session on the timeline is placed on the same `[0, 24)` hour domain.
//! Positions are expressed as percentages of that domain.

use chrono::{DateTime, TimeZone, Timelike, Utc};

/// Length of the axis in hours
pub const AXIS_HOURS: f64 = 24.0;

/// `hour + minute/60 + second/3600`
///
/// Session times and reference instants both go through here so that
/// boundary comparisons see bit-identical values.
pub fn hours_from_hms(hour: u32, minute: u32, second: u32) -> f64 {
    f64::from(hour) + f64::from(minute) / 60.0 + f64::from(second) / 3600.0
}

/// Fractional hour of the day for any timezone-aware instant
pub fn fractional_hour<Tz: TimeZone>(instant: &DateTime<Tz>) -> f64 {
    hours_from_hms(instant.hour(), instant.minute(), instant.second())
}

/// Fractional hour of the UTC day
pub fn hour_of_utc_day(instant: &DateTime<Utc>) -> f64 {
    fractional_hour(instant)
}

/// Convert an axis position in hours to a percentage of the axis, clamped to `[0, 100]`
pub fn hours_to_percent(hours: f64) -> f64 {
    (hours / AXIS_HOURS * 100.0).clamp(0.0, 100.0)
}

/// Convert a duration in hours to a width on the axis, clamped to `[0, 100]`
pub fn span_to_percent(hours: f64) -> f64 {
    hours_to_percent(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_of_utc_day() {
        let t = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        assert!((hour_of_utc_day(&t) - 14.5).abs() < 1e-9);

        let t = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 36).unwrap();
        assert!((hour_of_utc_day(&t) - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_hour_in_zone() {
        let t = Utc.with_ymd_and_hms(2024, 1, 15, 0, 15, 0).unwrap();
        let tokyo = t.with_timezone(&chrono_tz::Asia::Tokyo);
        assert!((fractional_hour(&tokyo) - 9.25).abs() < 1e-9);
    }

    #[test]
    fn test_percent_conversion() {
        assert!((hours_to_percent(6.0) - 25.0).abs() < 1e-9);
        assert!((hours_to_percent(24.0) - 100.0).abs() < 1e-9);
        assert!((hours_to_percent(30.0) - 100.0).abs() < 1e-9);
        assert!(hours_to_percent(-1.0).abs() < 1e-9);
        assert!((span_to_percent(8.0) - 33.333_333).abs() < 1e-4);
    }
}
