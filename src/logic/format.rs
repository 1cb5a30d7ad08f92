//! Unit conversion and display formatting shared by the TUI and `print`.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

const MS_TO_KMH: f64 = 3.6;

/// Round half up toward positive infinity (2.5 -> 3, -2.5 -> -2).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

pub fn ms_to_kmh(ms: f64) -> i32 {
    round_half_up(ms * MS_TO_KMH)
}

/// One decimal place, with "—" for missing values.
///
/// Whole numbers print without a trailing ".0" ("1008 hPa", "6.5 km").
pub fn format_value(value: Option<f64>, unit: &str) -> String {
    let n = match value {
        Some(n) if !n.is_nan() => n,
        _ => return "—".to_string(),
    };
    let rounded = (n * 10.0 + 0.5).floor() / 10.0;
    if unit.is_empty() {
        format!("{}", rounded)
    } else {
        format!("{} {}", rounded, unit)
    }
}

/// "GMT+05:30" style label for a UTC offset in seconds
pub fn format_offset_label(offset_seconds: i64) -> String {
    let sign = if offset_seconds >= 0 { '+' } else { '-' };
    let abs = offset_seconds.unsigned_abs();
    let hours = abs / 3600;
    let minutes = (abs % 3600) / 60;
    format!("GMT{}{:02}:{:02}", sign, hours, minutes)
}

/// Wall-clock time at a location with the given UTC offset
pub fn local_time_for_offset(now: DateTime<Utc>, offset_seconds: i64) -> NaiveDateTime {
    now.naive_utc() + Duration::seconds(offset_seconds)
}

/// "14:05 • GMT+05:30"
pub fn local_time_label(now: DateTime<Utc>, offset_seconds: i64) -> String {
    format!(
        "{} • {}",
        local_time_for_offset(now, offset_seconds).format("%H:%M"),
        format_offset_label(offset_seconds)
    )
}

/// Calendar date at the location for a UTC timestamp.
///
/// Returns `None` when the shifted instant is outside chrono's range.
pub fn local_date(timestamp_utc: i64, offset_seconds: i64) -> Option<NaiveDate> {
    let shifted = timestamp_utc.checked_add(offset_seconds)?;
    DateTime::from_timestamp(shifted, 0).map(|dt| dt.date_naive())
}

/// "Fri 16 Oct"
pub fn date_label(date: NaiveDate) -> String {
    date.format("%a %d %b").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_half_up(1.5), 2);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(18.4), 18);
        assert_eq!(round_half_up(22.9), 23);
    }

    #[test]
    fn wind_conversion() {
        assert_eq!(ms_to_kmh(5.0), 18);
        assert_eq!(ms_to_kmh(0.0), 0);
        assert_eq!(ms_to_kmh(10.0), 36);
    }

    #[test]
    fn format_value_variants() {
        assert_eq!(format_value(None, "mm"), "—");
        assert_eq!(format_value(Some(f64::NAN), "mm"), "—");
        assert_eq!(format_value(Some(12.0), "km/h"), "12 km/h");
        assert_eq!(format_value(Some(6.54), "km"), "6.5 km");
        assert_eq!(format_value(Some(0.0), "mm"), "0 mm");
        assert_eq!(format_value(Some(3.25), ""), "3.3");
    }

    #[test]
    fn offset_labels() {
        assert_eq!(format_offset_label(19800), "GMT+05:30");
        assert_eq!(format_offset_label(0), "GMT+00:00");
        assert_eq!(format_offset_label(-10800), "GMT-03:00");
        assert_eq!(format_offset_label(-34200), "GMT-09:30");
    }

    #[test]
    fn local_time_applies_offset() {
        let now = Utc.with_ymd_and_hms(2025, 7, 14, 22, 15, 0).unwrap();
        let local = local_time_for_offset(now, 19800);
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2025-07-15 03:45");
        assert_eq!(local_time_label(now, -3600), "21:15 • GMT-01:00");
    }

    #[test]
    fn local_date_crosses_midnight() {
        // 2025-07-14 21:00 UTC is already the 15th in UTC+5:30
        let ts = Utc
            .with_ymd_and_hms(2025, 7, 14, 21, 0, 0)
            .unwrap()
            .timestamp();
        assert_eq!(
            local_date(ts, 0),
            NaiveDate::from_ymd_opt(2025, 7, 14)
        );
        assert_eq!(
            local_date(ts, 19800),
            NaiveDate::from_ymd_opt(2025, 7, 15)
        );
        assert_eq!(local_date(i64::MAX, 1), None);
    }

    #[test]
    fn date_label_format() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(date_label(date), "Fri 16 Oct");
    }
}
