use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://restapi.amap.com/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for the weather lookup itself
#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// AMap web service key
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the AMap v3 REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds, applied to both the geocode and weather calls
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: default_api_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl WeatherConfig {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Base URL without trailing slashes
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// AMap web service key
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the AMap v3 REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            .set_default("host", default_host())?
            .set_default("port", default_port())?
            .set_default("api_base_url", default_api_base_url())?
            .set_default("timeout", default_timeout())?
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // Override with environment variables, e.g. AMAP_WEATHER_API_KEY
            .add_source(
                Environment::with_prefix("AMAP_WEATHER")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// The lookup settings handed to the weather service
    pub fn weather(&self) -> WeatherConfig {
        WeatherConfig {
            api_key: self.api_key.clone(),
            api_base_url: self.api_base_url.clone(),
            timeout: self.timeout,
        }
    }
}
