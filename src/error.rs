use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkyglanceError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl SkyglanceError {
    /// Short message suitable for the single-line status bar
    pub fn status_message(&self) -> String {
        match self {
            SkyglanceError::DataSourceUnavailable(msg)
            | SkyglanceError::InvalidData(msg)
            | SkyglanceError::NotFound(msg)
            | SkyglanceError::Config(msg) => msg.clone(),
            SkyglanceError::Http(e) if e.is_timeout() => "Request timed out".to_string(),
            SkyglanceError::Http(e) if e.is_connect() => "No network connection".to_string(),
            _ => "Something went wrong".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkyglanceError>;
