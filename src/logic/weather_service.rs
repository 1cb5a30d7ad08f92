use crate::config::Config;
use crate::datasources::OpenWeatherMapClient;
use crate::error::{Result, SkyglanceError};
use crate::logic::aggregate::aggregate_daily;
use crate::models::WeatherReport;
use chrono::Utc;

pub const CURRENT_LOCATION_LABEL: &str = "Current Location";

/// What the user asked to see
#[derive(Debug, Clone, PartialEq)]
pub enum LocationRequest {
    City(String),
    Coords {
        latitude: f64,
        longitude: f64,
        label: Option<String>,
    },
    CurrentLocation,
}

impl LocationRequest {
    /// Status line shown while the request is in flight
    pub fn pending_message(&self) -> &'static str {
        match self {
            LocationRequest::City(_) => "Resolving city…",
            LocationRequest::Coords { .. } => "Fetching weather…",
            LocationRequest::CurrentLocation => "Locating…",
        }
    }
}

pub struct WeatherService {
    config: Config,
    client: OpenWeatherMapClient,
}

impl WeatherService {
    pub fn new(config: Config) -> Result<Self> {
        let client = OpenWeatherMapClient::new(config.openweathermap.clone())?;
        if client.onecall_enabled() {
            tracing::info!("One Call UV index enabled");
        }
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve "current location" to the configured position, if any
    pub fn device_position(&self) -> Option<(f64, f64)> {
        self.config.location.coordinates()
    }

    pub async fn load(&self, request: &LocationRequest) -> Result<WeatherReport> {
        match request {
            LocationRequest::City(query) => self.load_by_city(query).await,
            LocationRequest::Coords {
                latitude,
                longitude,
                label,
            } => {
                self.load_by_coords(*latitude, *longitude, label.as_deref())
                    .await
            }
            LocationRequest::CurrentLocation => match self.device_position() {
                Some((lat, lon)) => {
                    self.load_by_coords(lat, lon, Some(CURRENT_LOCATION_LABEL))
                        .await
                }
                None => {
                    tracing::info!(
                        "No position configured - falling back to {:?}",
                        self.config.location.default_query
                    );
                    self.load_by_city(&self.config.location.default_query).await
                }
            },
        }
    }

    pub async fn load_by_city(&self, query: &str) -> Result<WeatherReport> {
        let place = self.client.geocode(query).await?;
        let label = place.display_name();
        tracing::info!("Resolved {:?} to {}", query, label);
        self.load_by_coords(place.latitude, place.longitude, Some(&label))
            .await
    }

    /// Fetch current conditions, forecast and UV index together.
    ///
    /// The first failing mandatory fetch aborts the whole load.
    pub async fn load_by_coords(
        &self,
        lat: f64,
        lon: f64,
        label_override: Option<&str>,
    ) -> Result<WeatherReport> {
        let (current, forecast, uv_max) = tokio::try_join!(
            self.client.fetch_current(lat, lon),
            self.client.fetch_forecast(lat, lon),
            async { Ok::<_, SkyglanceError>(self.client.fetch_uv_max(lat, lon).await) },
        )?;

        let place_label = match label_override {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => current.place_label(),
        };

        let days = aggregate_daily(&forecast.samples, forecast.timezone_offset);
        tracing::debug!(
            "Aggregated {} forecast samples into {} days",
            forecast.samples.len(),
            days.len()
        );

        Ok(WeatherReport {
            place_label,
            current,
            days,
            uv_max,
            fetched_at: Utc::now(),
        })
    }

    /// Probe the API key using the configured or default location
    pub async fn check_connection(&self) -> Result<bool> {
        let (lat, lon) = match self.device_position() {
            Some(pos) => pos,
            None => {
                let place = self.client.geocode(&self.config.location.default_query).await?;
                (place.latitude, place.longitude)
            }
        };
        self.client.test_connection(lat, lon).await
    }
}
