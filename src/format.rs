// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display formatting for durations, paces and dates.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render elapsed seconds as `H:MM:SS`, or `M:SS` under one hour.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Seconds per kilometer, or `None` when the distance is not a positive
/// finite number.
pub fn pace_seconds_per_km(distance_km: f64, time_seconds: u64) -> Option<f64> {
    if distance_km.is_finite() && distance_km > 0.0 {
        Some(time_seconds as f64 / distance_km)
    } else {
        None
    }
}

/// Render pace per kilometer as `M:SS`. Seconds are truncated, not rounded.
pub fn format_pace(distance_km: f64, time_seconds: u64) -> Option<String> {
    let pace = pace_seconds_per_km(distance_km, time_seconds)?;
    let minutes = (pace / 60.0).floor() as u64;
    let seconds = (pace % 60.0).floor() as u64;
    Some(format!("{}:{:02}", minutes, seconds))
}

/// Long date form, `YYYY.MM.DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y.%m.%d").to_string()
}

/// Short date form, `YY.MM.DD`.
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%y.%m.%d").to_string()
}

/// Render a race-time delta: `↑M:SS` for an improvement (positive),
/// `↓M:SS` otherwise.
pub fn format_improvement(seconds: i64) -> String {
    let sign = if seconds > 0 { '↑' } else { '↓' };
    let abs = seconds.unsigned_abs();
    format!("{}{}:{:02}", sign, abs / 60, abs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_duration(rendered: &str) -> u64 {
        let parts: Vec<u64> = rendered.split(':').map(|p| p.parse().unwrap()).collect();
        match parts.as_slice() {
            [h, m, s] => h * 3600 + m * 60 + s,
            [m, s] => m * 60 + s,
            _ => panic!("unexpected duration format: {}", rendered),
        }
    }

    #[test]
    fn test_format_duration_examples() {
        assert_eq!(format_duration(3661), "1:01:01");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(600), "10:00");
        assert_eq!(format_duration(14400), "4:00:00");
        assert_eq!(format_duration(36_000 + 59), "10:00:59");
    }

    #[test]
    fn test_format_duration_round_trip() {
        for seconds in (0..20_000).step_by(7).chain([3599, 3600, 86_399, 360_000]) {
            assert_eq!(parse_duration(&format_duration(seconds)), seconds);
        }
    }

    #[test]
    fn test_format_pace() {
        // 25:00 over 5km
        assert_eq!(format_pace(5.0, 1500).as_deref(), Some("5:00"));
        // 4:00:00 marathon: 341.3 s/km
        assert_eq!(format_pace(42.195, 14400).as_deref(), Some("5:41"));
        assert_eq!(format_pace(10.0, 3005).as_deref(), Some("5:00"));
        assert_eq!(format_pace(1.0, 65).as_deref(), Some("1:05"));
    }

    #[test]
    fn test_format_pace_rejects_non_positive_distance() {
        assert_eq!(format_pace(0.0, 1500), None);
        assert_eq!(format_pace(-1.0, 1500), None);
        assert_eq!(format_pace(f64::NAN, 1500), None);
        assert_eq!(pace_seconds_per_km(0.0, 0), None);
    }

    #[test]
    fn test_format_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_date(date), "2024.03.01");
        assert_eq!(format_date_short(date), "24.03.01");

        let date = NaiveDate::from_ymd_opt(2009, 12, 31).unwrap();
        assert_eq!(format_date_short(date), "09.12.31");
    }

    #[test]
    fn test_format_improvement_sign() {
        assert_eq!(format_improvement(300), "↑5:00");
        assert_eq!(format_improvement(-65), "↓1:05");
        assert_eq!(format_improvement(7), "↑0:07");
    }

    #[test]
    fn test_format_utc_rfc3339() {
        let ts = DateTime::from_timestamp(1_704_103_200, 500).unwrap();
        assert_eq!(format_utc_rfc3339(ts), "2024-01-01T10:00:00Z");
    }
}
