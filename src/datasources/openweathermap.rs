use crate::config::OpenWeatherMapConfig;
use crate::error::{Result, SkyglanceError};
use crate::models::{
    CurrentConditions, ForecastSample, Place, WeatherForecast, FALLBACK_CONDITION_ID,
};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures. Every field the dashboard can live
// without is optional so a sparse response degrades instead of failing.
#[derive(Debug, Deserialize)]
struct OwmGeoMatch {
    name: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    country: Option<String>,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    #[serde(default)]
    main: Option<OwmMain>,
    #[serde(default)]
    clouds: Option<OwmClouds>,
    #[serde(default)]
    wind: Option<OwmWind>,
    #[serde(default)]
    visibility: Option<f64>,
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
    #[serde(default)]
    snow: Option<OwmPrecipitation>,
    #[serde(default)]
    sys: Option<OwmSys>,
    #[serde(default)]
    timezone: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    #[serde(default)]
    list: Vec<OwmForecastItem>,
    #[serde(default)]
    city: Option<OwmCity>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    #[serde(default)]
    main: Option<OwmMain>,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    #[serde(default)]
    wind: Option<OwmWind>,
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
    #[serde(default)]
    snow: Option<OwmPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    #[serde(default)]
    temp: Option<f64>,
    #[serde(default)]
    feels_like: Option<f64>,
    #[serde(default)]
    humidity: Option<f64>,
    #[serde(default)]
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    main: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    #[serde(default)]
    all: Option<f64>, // cloudiness percentage
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    #[serde(default)]
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "1h", default)]
    one_hour: Option<f64>,
    #[serde(rename = "3h", default)]
    three_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    timezone: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwmOneCallResponse {
    #[serde(default)]
    daily: Vec<OwmOneCallDay>,
}

#[derive(Debug, Deserialize)]
struct OwmOneCallDay {
    #[serde(default)]
    uvi: Option<f64>,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn onecall_enabled(&self) -> bool {
        self.config.use_onecall
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let mut pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        pairs.push(("appid", self.config.api_key.as_str()));

        Url::parse_with_params(&format!("{}{}", base, path), &pairs).map_err(|e| {
            SkyglanceError::Config(format!("Invalid OpenWeatherMap base URL: {}", e))
        })
    }

    fn coord_params(lat: f64, lon: f64) -> Vec<(&'static str, String)> {
        vec![
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", "metric".to_string()),
        ]
    }

    /// GET a JSON document; a non-success status becomes `failure_message`
    async fn get_json<T: DeserializeOwned>(&self, url: Url, failure_message: &str) -> Result<T> {
        let response: Response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("OpenWeatherMap returned {}: {}", status, body);
            return Err(SkyglanceError::DataSourceUnavailable(
                failure_message.to_string(),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::warn!("Failed to parse OpenWeatherMap response: {}", e);
            SkyglanceError::InvalidData(format!("{} (unreadable response)", failure_message))
        })
    }

    /// Resolve a free-text place name to its best match
    pub async fn geocode(&self, query: &str) -> Result<Place> {
        let url = self.endpoint(
            "/geo/1.0/direct",
            &[("q", query.to_string()), ("limit", "1".to_string())],
        )?;

        let matches: Vec<OwmGeoMatch> = self.get_json(url, "Geocoding failed").await?;
        let best = matches
            .into_iter()
            .next()
            .ok_or_else(|| SkyglanceError::NotFound("No matches found".into()))?;

        Ok(Place {
            name: best.name,
            state: best.state,
            country: best.country,
            latitude: best.lat,
            longitude: best.lon,
        })
    }

    /// Fetch current conditions in metric units
    pub async fn fetch_current(&self, lat: f64, lon: f64) -> Result<CurrentConditions> {
        let url = self.endpoint("/data/2.5/weather", &Self::coord_params(lat, lon))?;
        let response: OwmCurrentResponse = self.get_json(url, "Current weather failed").await?;
        Ok(convert_current(response))
    }

    /// Fetch the 5-day/3-hour forecast in metric units
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<WeatherForecast> {
        let url = self.endpoint("/data/2.5/forecast", &Self::coord_params(lat, lon))?;
        let response: OwmForecastResponse = self.get_json(url, "Forecast failed").await?;
        Ok(convert_forecast(response))
    }

    /// Today's maximum UV index from One Call 3.0.
    ///
    /// Best effort: disabled, failed or incomplete lookups all yield `None`.
    pub async fn fetch_uv_max(&self, lat: f64, lon: f64) -> Option<f64> {
        if !self.config.use_onecall {
            return None;
        }

        let mut params = Self::coord_params(lat, lon);
        params.push(("exclude", "minutely,hourly,alerts".to_string()));
        let url = match self.endpoint("/data/3.0/onecall", &params) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("UV index lookup skipped: {}", e);
                return None;
            }
        };

        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("UV index request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("UV index request returned status {}", response.status());
            return None;
        }

        match response.json::<OwmOneCallResponse>().await {
            Ok(body) => body.daily.first().and_then(|d| d.uvi),
            Err(e) => {
                tracing::debug!("UV index parse error: {}", e);
                None
            }
        }
    }

    /// Test the API key against the current-weather endpoint
    pub async fn test_connection(&self, lat: f64, lon: f64) -> Result<bool> {
        let url = self.endpoint("/data/2.5/weather", &Self::coord_params(lat, lon))?;
        let response = self.client.get(url).send().await?;
        Ok(response.status().is_success())
    }
}

fn precipitation_windows(p: Option<&OwmPrecipitation>) -> (Option<f64>, Option<f64>) {
    p.map(|p| (p.one_hour, p.three_hour)).unwrap_or((None, None))
}

fn convert_current(response: OwmCurrentResponse) -> CurrentConditions {
    let weather = response.weather.first();
    let main = response.main.as_ref();
    let (rain_1h, rain_3h) = precipitation_windows(response.rain.as_ref());
    let (snow_1h, snow_3h) = precipitation_windows(response.snow.as_ref());

    CurrentConditions {
        name: response.name,
        country: response.sys.and_then(|s| s.country),
        condition_id: weather.and_then(|w| w.id).unwrap_or(FALLBACK_CONDITION_ID),
        description: weather.and_then(|w| w.description.clone()),
        temperature: main.and_then(|m| m.temp),
        feels_like: main.and_then(|m| m.feels_like),
        humidity_percent: main.and_then(|m| m.humidity),
        cloud_cover_percent: response.clouds.and_then(|c| c.all),
        wind_speed: response.wind.and_then(|w| w.speed),
        pressure_hpa: main.and_then(|m| m.pressure),
        visibility_m: response.visibility,
        rain_1h,
        rain_3h,
        snow_1h,
        snow_3h,
        timezone_offset: response.timezone.unwrap_or(0),
    }
}

fn convert_forecast(response: OwmForecastResponse) -> WeatherForecast {
    let samples = response.list.iter().map(convert_forecast_item).collect();
    let city = response.city;

    WeatherForecast {
        timezone_offset: city.as_ref().and_then(|c| c.timezone).unwrap_or(0),
        city: city.as_ref().and_then(|c| c.name.clone()),
        country: city.and_then(|c| c.country),
        samples,
    }
}

fn convert_forecast_item(item: &OwmForecastItem) -> ForecastSample {
    let weather = item.weather.first();
    let three_hour = |p: &Option<OwmPrecipitation>| {
        p.as_ref().and_then(|p| p.three_hour).unwrap_or(0.0)
    };

    ForecastSample {
        timestamp_utc: item.dt,
        temperature: item.main.as_ref().and_then(|m| m.temp),
        rain_mm: three_hour(&item.rain),
        snow_mm: three_hour(&item.snow),
        wind_speed: item.wind.as_ref().and_then(|w| w.speed).unwrap_or(0.0),
        condition_id: weather.and_then(|w| w.id),
        condition_label: weather.and_then(|w| w.main.clone()),
    }
}
