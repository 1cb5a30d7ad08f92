use crate::error::{Result, SkyglanceError};
use dialoguer::{Confirm, Input};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_QUERY: &str = "Mango, Jharkhand";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Query One Call 3.0 for the UV index (requires a subscription)
    #[serde(default)]
    pub use_onecall: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("use_onecall", &self.use_onecall)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    /// City searched when no device position is available
    #[serde(default = "default_query")]
    pub default_query: String,
    /// Fixed position used as the "current location"
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_query: default_query(),
            latitude: None,
            longitude: None,
        }
    }
}

impl LocationConfig {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

impl Config {
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.to_path_buf(),
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(SkyglanceError::Config(format!(
                "Config file not found at {:?}. Run `skyglance init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SkyglanceError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Parse YAML after `${VAR}` substitution
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| SkyglanceError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let key = self.openweathermap.api_key.trim();
        if key.is_empty() || key.starts_with("${") {
            return Err(SkyglanceError::Config(
                "openweathermap.api_key is empty - set it or export the referenced variable"
                    .into(),
            ));
        }
        if self.location.latitude.is_some() != self.location.longitude.is_some() {
            return Err(SkyglanceError::Config(
                "location.latitude and location.longitude must be set together".into(),
            ));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&Path>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/skyglance/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SkyglanceError::Config("Cannot determine config directory".into()))?
            .join("skyglance");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive(config_override: Option<&Path>) -> Result<(Self, PathBuf)> {
        let input_err = |e: dialoguer::Error| SkyglanceError::Config(format!("Input error: {}", e));

        println!();
        println!("Let's set up skyglance!");
        println!();

        println!("OpenWeatherMap");
        let api_key: String = Input::new()
            .with_prompt("  API key (or ${VAR} to read it from the environment)")
            .default("${OWM_API_KEY}".into())
            .interact_text()
            .map_err(input_err)?;

        let use_onecall = Confirm::new()
            .with_prompt("  Query One Call 3.0 for the UV index?")
            .default(false)
            .interact()
            .map_err(input_err)?;

        println!();

        println!("Location");
        let default_query: String = Input::new()
            .with_prompt("  Default city")
            .default(DEFAULT_QUERY.into())
            .interact_text()
            .map_err(input_err)?;

        let has_position = Confirm::new()
            .with_prompt("  Set a fixed position for \"Current Location\"?")
            .default(false)
            .interact()
            .map_err(input_err)?;

        let (latitude, longitude) = if has_position {
            let lat: f64 = Input::new()
                .with_prompt("  Latitude")
                .interact_text()
                .map_err(input_err)?;
            let lon: f64 = Input::new()
                .with_prompt("  Longitude")
                .interact_text()
                .map_err(input_err)?;
            (Some(lat), Some(lon))
        } else {
            (None, None)
        };

        println!();

        let config = Config {
            openweathermap: OpenWeatherMapConfig {
                api_key,
                base_url: default_base_url(),
                use_onecall,
            },
            location: LocationConfig {
                default_query,
                latitude,
                longitude,
            },
        };

        let config_path = match config_override {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };
        config.write_to(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        // Reload so ${VAR} references resolve the same way as on startup
        let loaded = Self::load(Some(config_path.as_path()))?;
        Ok((loaded, config_path))
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        let content = format!(
            "# skyglance configuration\n# Generated by `skyglance init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}
