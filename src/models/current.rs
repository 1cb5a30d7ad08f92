use crate::logic::format::{format_value, ms_to_kmh, round_half_up};
use crate::models::condition::{theme_for, ConditionTheme};
use crate::models::forecast::DailySummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Best geocoding match for a free-text place query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    /// "Name, State, Country" with missing or empty parts skipped
    pub fn display_name(&self) -> String {
        [Some(&self.name), self.state.as_ref(), self.country.as_ref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Current conditions at a coordinate, metric units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub name: Option<String>,
    pub country: Option<String>,
    pub condition_id: u32,
    pub description: Option<String>,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub cloud_cover_percent: Option<f64>,
    pub wind_speed: Option<f64>, // m/s
    pub pressure_hpa: Option<f64>,
    pub visibility_m: Option<f64>,
    pub rain_1h: Option<f64>,
    pub rain_3h: Option<f64>,
    pub snow_1h: Option<f64>,
    pub snow_3h: Option<f64>,
    pub timezone_offset: i64,
}

impl CurrentConditions {
    pub fn theme(&self) -> ConditionTheme {
        theme_for(self.condition_id)
    }

    /// Provider description when present, otherwise the theme's text
    pub fn summary_text(&self) -> String {
        match self.description.as_deref() {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => self.theme().text.to_string(),
        }
    }

    /// Latest precipitation volume, preferring the 1h window over the 3h one
    pub fn precipitation_mm(&self) -> f64 {
        let rain = self.rain_1h.or(self.rain_3h).unwrap_or(0.0);
        let snow = self.snow_1h.or(self.snow_3h).unwrap_or(0.0);
        rain + snow
    }

    pub fn wind_kmh(&self) -> Option<i32> {
        self.wind_speed.map(ms_to_kmh)
    }

    /// "Name, CC" as reported by the current-weather endpoint
    pub fn place_label(&self) -> String {
        let name = self
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("—");
        match self.country.as_deref() {
            Some(c) if !c.is_empty() => format!("{}, {}", name, c),
            _ => name.to_string(),
        }
    }

    pub fn temperature_label(&self) -> String {
        match self.temperature {
            Some(t) => format!("{}°C", round_half_up(t)),
            None => "--°C".to_string(),
        }
    }

    /// Short key/value chips shown under the headline temperature
    pub fn chips(&self, uv_max: Option<f64>) -> Vec<(&'static str, String)> {
        let dash = || "—".to_string();
        vec![
            (
                "Feels",
                self.feels_like
                    .map(|t| format!("{}°C", round_half_up(t)))
                    .unwrap_or_else(dash),
            ),
            (
                "Humidity",
                self.humidity_percent
                    .map(|h| format!("{}%", h))
                    .unwrap_or_else(dash),
            ),
            (
                "Cloud",
                self.cloud_cover_percent
                    .map(|c| format!("{}%", c))
                    .unwrap_or_else(dash),
            ),
            (
                "UV max",
                uv_max
                    .map(|u| round_half_up(u).to_string())
                    .unwrap_or_else(dash),
            ),
        ]
    }

    /// Labelled detail rows for the facts panel
    pub fn facts(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Wind",
                format_value(self.wind_kmh().map(f64::from), "km/h"),
            ),
            ("Pressure", format_value(self.pressure_hpa, "hPa")),
            (
                "Visibility",
                format_value(self.visibility_m.map(|v| v / 1000.0), "km"),
            ),
            (
                "Precipitation",
                format_value(Some(self.precipitation_mm()), "mm"),
            ),
        ]
    }
}

/// Everything the dashboard renders for one location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub place_label: String,
    pub current: CurrentConditions,
    pub days: Vec<DailySummary>,
    pub uv_max: Option<f64>,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReport {
    pub fn theme(&self) -> ConditionTheme {
        self.current.theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::condition::VisualCategory;
    use crate::models::fixtures::sample_current;

    #[test]
    fn place_display_name_skips_missing_parts() {
        let place = Place {
            name: "Mango".into(),
            state: Some("Jharkhand".into()),
            country: Some("IN".into()),
            latitude: 22.84,
            longitude: 86.23,
        };
        assert_eq!(place.display_name(), "Mango, Jharkhand, IN");

        let place = Place {
            state: None,
            country: Some(String::new()),
            ..place
        };
        assert_eq!(place.display_name(), "Mango");
    }

    #[test]
    fn precipitation_prefers_one_hour_window() {
        let current = sample_current();
        assert!((current.precipitation_mm() - 0.42).abs() < 1e-9);

        let current = CurrentConditions {
            rain_1h: None,
            snow_3h: Some(0.5),
            ..sample_current()
        };
        assert!((current.precipitation_mm() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn summary_and_theme() {
        let current = sample_current();
        assert_eq!(current.summary_text(), "light rain");
        assert_eq!(current.theme().category, VisualCategory::Rain);

        let current = CurrentConditions {
            description: None,
            ..sample_current()
        };
        assert_eq!(current.summary_text(), "Rain");
    }

    #[test]
    fn place_label_uses_dash_for_missing_name() {
        assert_eq!(sample_current().place_label(), "Ranchi, IN");
        let current = CurrentConditions {
            name: None,
            country: None,
            ..sample_current()
        };
        assert_eq!(current.place_label(), "—");
    }

    #[test]
    fn chips_and_facts() {
        let current = sample_current();
        let chips = current.chips(Some(7.6));
        assert_eq!(chips[0], ("Feels", "25°C".to_string()));
        assert_eq!(chips[1], ("Humidity", "83%".to_string()));
        assert_eq!(chips[3], ("UV max", "8".to_string()));
        assert_eq!(current.chips(None)[3].1, "—");

        let facts = current.facts();
        assert_eq!(facts[0], ("Wind", "11 km/h".to_string()));
        assert_eq!(facts[1], ("Pressure", "1008 hPa".to_string()));
        assert_eq!(facts[2], ("Visibility", "6.5 km".to_string()));
        assert_eq!(facts[3], ("Precipitation", "0.4 mm".to_string()));
    }

    #[test]
    fn temperature_label() {
        assert_eq!(sample_current().temperature_label(), "25°C");
        let current = CurrentConditions {
            temperature: None,
            ..sample_current()
        };
        assert_eq!(current.temperature_label(), "--°C");
    }
}
