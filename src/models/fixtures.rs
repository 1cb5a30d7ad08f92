use crate::models::{CurrentConditions, DailySummary, WeatherReport};
use chrono::{NaiveDate, TimeZone, Utc};

pub fn sample_current() -> CurrentConditions {
    CurrentConditions {
        name: Some("Ranchi".into()),
        country: Some("IN".into()),
        condition_id: 500,
        description: Some("light rain".into()),
        temperature: Some(24.6),
        feels_like: Some(25.2),
        humidity_percent: Some(83.0),
        cloud_cover_percent: Some(75.0),
        wind_speed: Some(3.1),
        pressure_hpa: Some(1008.0),
        visibility_m: Some(6500.0),
        rain_1h: Some(0.42),
        rain_3h: Some(1.0),
        snow_1h: None,
        snow_3h: None,
        timezone_offset: 19800,
    }
}

pub fn sample_day(day: u32, condition_id: u32) -> DailySummary {
    let date = NaiveDate::from_ymd_opt(2025, 7, day).unwrap();
    let theme = crate::models::theme_for(condition_id);
    DailySummary {
        date,
        day_label: crate::logic::format::date_label(date),
        condition_id,
        icon: theme.icon.to_string(),
        condition_text: theme.text.to_string(),
        temp_min: Some(21),
        temp_max: Some(29),
        precipitation_mm: 4,
        wind_kmh: 14,
    }
}

pub fn sample_report() -> WeatherReport {
    WeatherReport {
        place_label: "Ranchi, Jharkhand, IN".into(),
        current: sample_current(),
        days: (14..19).map(|d| sample_day(d, 500)).collect(),
        uv_max: Some(6.2),
        fetched_at: Utc.with_ymd_and_hms(2025, 7, 14, 6, 30, 0).unwrap(),
    }
}
