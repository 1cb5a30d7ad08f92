use crate::logic::format::local_time_label;
use crate::models::WeatherReport;
use chrono::{DateTime, Utc};

/// Text rendering of a report for `skyglance print`
pub fn render_report(report: &WeatherReport, now: DateTime<Utc>) -> String {
    let current = &report.current;
    let theme = current.theme();

    let chips: Vec<String> = current
        .chips(report.uv_max)
        .into_iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect();

    let mut lines = vec![
        report.place_label.clone(),
        local_time_label(now, current.timezone_offset),
        String::new(),
        format!(
            "{} {}  {}",
            theme.icon,
            current.temperature_label(),
            current.summary_text()
        ),
        chips.join(" | "),
    ];

    for (key, value) in current.facts() {
        lines.push(format!("  {:<14}{}", key, value));
    }

    if !report.days.is_empty() {
        lines.push(String::new());
        for day in &report.days {
            lines.push(format!(
                "{:<11} {} {:<11} rain {:>3} mm  wind {:>3} km/h  {}",
                day.day_label,
                day.icon,
                day.temp_range_label(),
                day.precipitation_mm,
                day.wind_kmh,
                day.condition_text
            ));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
