use crate::logic::LocationRequest;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skyglance", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show weather for a city instead of the current location
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub city: Option<String>,

    /// Latitude to show (requires --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude to show (requires --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test the API key
    Check,
    /// Fetch once and print the summary to stdout
    Print,
}

impl Cli {
    /// Location to load first, from the command line or the current location
    pub fn initial_request(&self) -> LocationRequest {
        if let Some(city) = self.city.as_ref().filter(|c| !c.trim().is_empty()) {
            return LocationRequest::City(city.trim().to_string());
        }
        match (self.lat, self.lon) {
            (Some(latitude), Some(longitude)) => LocationRequest::Coords {
                latitude,
                longitude,
                label: None,
            },
            _ => LocationRequest::CurrentLocation,
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
