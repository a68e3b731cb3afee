use serde_json::Value;
use std::sync::Arc;

use super::actions::*;
use crate::config::WeatherConfig;
use crate::weather::{format_report, LookupRequest, WeatherLookup, WeatherService};

pub const INVALID_CITY_MESSAGE: &str = "请提供有效的城市名称";

/// The weather plugin as seen by the agent host.
///
/// Every action answers with text: lookup failures become a readable
/// message, never an error. Only malformed host calls (unknown action,
/// undecodable arguments) surface as [`ActionError`].
pub struct WeatherPlugin {
    lookup: Arc<dyn WeatherLookup>,
}

impl WeatherPlugin {
    pub fn new(lookup: Arc<dyn WeatherLookup>) -> Self {
        Self { lookup }
    }

    /// Plugin backed by the AMap service
    pub fn from_config(config: WeatherConfig) -> Self {
        if config.api_key.is_empty() {
            tracing::warn!("AMap API key is empty; all lookups will be rejected by the provider");
        }
        Self::new(Arc::new(WeatherService::new(config)))
    }

    pub fn info(&self) -> PluginInfo {
        plugin_info()
    }

    /// Current conditions for a city
    pub async fn query_weather(&self, city: &str) -> String {
        let Ok(request) = LookupRequest::new(city, None) else {
            return INVALID_CITY_MESSAGE.to_string();
        };

        tracing::info!(city = %request.city, "Querying current weather");

        match self.lookup.resolve_and_fetch(&request.city).await {
            Ok(report) => {
                let text = format_report(&report, false);
                tracing::info!(city = %request.city, "Current weather query succeeded");
                text
            }
            Err(e) => {
                tracing::warn!(city = %request.city, error = %e, "Current weather query failed");
                format!(
                    "❌ 无法获取 {} 的天气信息\n可能的原因:\n- 城市名称不正确\n- API Key 无效\n- 网络连接问题",
                    request.city
                )
            }
        }
    }

    /// Current conditions plus forecast for a city.
    ///
    /// `days` is clamped into [1, 7] but the rendered forecast is always
    /// capped at [`crate::weather::FORECAST_DISPLAY_LIMIT`] entries.
    pub async fn query_weather_forecast(&self, city: &str, days: Option<i64>) -> String {
        let Ok(request) = LookupRequest::new(city, days) else {
            return INVALID_CITY_MESSAGE.to_string();
        };

        tracing::info!(
            city = %request.city,
            days = request.forecast_days,
            "Querying weather forecast"
        );

        match self.lookup.resolve_and_fetch(&request.city).await {
            Ok(report) => {
                let text = format_report(&report, true);
                tracing::info!(city = %request.city, "Weather forecast query succeeded");
                text
            }
            Err(e) => {
                tracing::warn!(city = %request.city, error = %e, "Weather forecast query failed");
                format!("❌ 无法获取 {} 的天气信息", request.city)
            }
        }
    }

    /// Dispatch a host call by action name
    pub async fn invoke(&self, action: &str, args: Value) -> Result<String, ActionError> {
        match action {
            QUERY_WEATHER => {
                let args: QueryWeatherArgs = decode_args(action, args)?;
                Ok(self.query_weather(&args.city).await)
            }
            QUERY_WEATHER_FORECAST => {
                let args: QueryForecastArgs = decode_args(action, args)?;
                Ok(self.query_weather_forecast(&args.city, args.days).await)
            }
            other => Err(ActionError::UnknownAction(other.to_string())),
        }
    }

    /// Teardown hook; the plugin holds no connections between calls
    pub async fn cleanup(&self) {
        tracing::info!(plugin = PLUGIN_MODULE_NAME, "Weather plugin cleaned up");
    }
}
