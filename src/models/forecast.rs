use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Forecast data from the OpenWeatherMap 5-day/3-hour API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub city: Option<String>,
    pub country: Option<String>,
    pub timezone_offset: i64, // seconds east of UTC for the forecast location
    pub samples: Vec<ForecastSample>,
}

/// A single 3-hour forecast point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp_utc: i64,
    pub temperature: Option<f64>, // °C
    pub rain_mm: f64,             // 3h accumulation
    pub snow_mm: f64,             // 3h accumulation
    pub wind_speed: f64,          // m/s
    pub condition_id: Option<u32>,
    pub condition_label: Option<String>,
}

#[cfg(test)]
impl ForecastSample {
    /// Empty sample at `timestamp_utc`; tests fill in the fields they need
    pub fn new(timestamp_utc: i64) -> Self {
        Self {
            timestamp_utc,
            temperature: None,
            rain_mm: 0.0,
            snow_mm: 0.0,
            wind_speed: 0.0,
            condition_id: None,
            condition_label: None,
        }
    }

    pub fn precipitation_mm(&self) -> f64 {
        self.rain_mm + self.snow_mm
    }
}

/// One local calendar day of the outlook, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub day_label: String,
    pub condition_id: u32,
    pub icon: String,
    pub condition_text: String,
    pub temp_min: Option<i32>,
    pub temp_max: Option<i32>,
    pub precipitation_mm: i32,
    pub wind_kmh: i32,
}

impl DailySummary {
    /// "min° / max°", with "--" standing in for a day without temperatures
    pub fn temp_range_label(&self) -> String {
        let show = |t: Option<i32>| t.map(|v| v.to_string()).unwrap_or_else(|| "--".into());
        format!("{}° / {}°", show(self.temp_min), show(self.temp_max))
    }
}
