pub mod aggregate;
pub mod format;
pub mod weather_service;

pub use weather_service::{LocationRequest, WeatherService};
