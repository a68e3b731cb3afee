use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use super::models::*;
use crate::config::WeatherConfig;

const GEOCODE_PATH: &str = "geocode/geo";
const WEATHER_INFO_PATH: &str = "weather/weatherInfo";
/// Ask for live conditions and the forecast in one call
const WEATHER_EXTENSIONS: &str = "all";

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Invalid lookup request: {0}")]
    Validation(String),

    #[error("Failed to fetch weather data: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("No weather data available for: {0}")]
    NoWeatherData(String),
}

/// Resolves a city name to a weather report
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Geocode `city`, then fetch live conditions and forecast for it
    async fn resolve_and_fetch(&self, city: &str) -> Result<WeatherReport, WeatherError>;
}

/// AMap implementation of WeatherLookup
pub struct WeatherService {
    config: WeatherConfig,
}

impl WeatherService {
    pub fn new(config: WeatherConfig) -> Self {
        Self { config }
    }

    /// One client per lookup so its connections are released when the lookup ends
    fn http_client(&self) -> Result<Client, WeatherError> {
        Ok(Client::builder()
            .timeout(self.config.timeout_duration())
            .build()?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url(), path)
    }

    /// Resolve a city name to its AMap administrative code
    async fn geocode(&self, client: &Client, city: &str) -> Result<GeoResolution, WeatherError> {
        tracing::debug!(city = %city, "Geocoding city");

        let response = client
            .get(self.endpoint(GEOCODE_PATH))
            .query(&[("key", self.config.api_key.as_str()), ("address", city)])
            .send()
            .await?
            .error_for_status()?;

        let data: GeocodeResponse = response.json().await?;

        if !data.is_success() || data.geocodes.is_empty() {
            tracing::warn!(
                city = %city,
                info = ?data.info,
                "City could not be geocoded"
            );
            return Err(WeatherError::CityNotFound(city.to_string()));
        }

        let ad_code = data
            .geocodes
            .into_iter()
            .next()
            .and_then(|g| g.adcode)
            .unwrap_or_default();

        tracing::debug!(city = %city, ad_code = %ad_code, "City geocoded");

        Ok(GeoResolution {
            city_name: city.to_string(),
            ad_code,
        })
    }

    /// Fetch live conditions and forecast for a resolved city
    async fn fetch_weather(
        &self,
        client: &Client,
        geo: GeoResolution,
    ) -> Result<WeatherReport, WeatherError> {
        tracing::debug!(
            city = %geo.city_name,
            ad_code = %geo.ad_code,
            "Fetching weather"
        );

        let response = client
            .get(self.endpoint(WEATHER_INFO_PATH))
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("city", geo.ad_code.as_str()),
                ("extensions", WEATHER_EXTENSIONS),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: WeatherInfoResponse = response.json().await?;

        if !data.is_success() {
            tracing::warn!(
                city = %geo.city_name,
                info = ?data.info,
                "Weather lookup rejected by provider"
            );
            return Err(WeatherError::NoWeatherData(geo.city_name));
        }

        let GeoResolution { city_name, .. } = geo;
        match WeatherReport::from_response(city_name.clone(), data) {
            Some(report) => Ok(report),
            None => {
                tracing::warn!(city = %city_name, "Provider returned no live conditions");
                Err(WeatherError::NoWeatherData(city_name))
            }
        }
    }
}

#[async_trait]
impl WeatherLookup for WeatherService {
    async fn resolve_and_fetch(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let city = validate_city(city)?;
        let client = self.http_client()?;

        let result = match self.geocode(&client, &city).await {
            Ok(geo) => self.fetch_weather(&client, geo).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(report) => tracing::info!(
                city = %report.city,
                forecast_days = report.forecast.len(),
                "Weather data fetched successfully"
            ),
            Err(WeatherError::Transport(e)) => {
                tracing::error!(city = %city, error = %e, "AMap request failed")
            }
            Err(_) => {}
        }

        result
    }
}
