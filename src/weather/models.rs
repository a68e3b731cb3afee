use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::service::WeatherError;

/// Status value AMap uses to mark a successful call
pub const AMAP_STATUS_OK: &str = "1";

pub const DEFAULT_FORECAST_DAYS: u8 = 3;
pub const MIN_FORECAST_DAYS: u8 = 1;
pub const MAX_FORECAST_DAYS: u8 = 7;

// ============================================================================
// Lenient field decoding
// AMap returns `[]` in place of absent string fields and occasionally numbers
// where strings are documented, so every scalar is decoded through these.
// ============================================================================

/// Strings pass through, numbers keep their decimal text, anything else is absent.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// `null` decodes to an empty list.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Geocoding API Response (Internal)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub info: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub geocodes: Vec<GeocodeRecord>,
}

impl GeocodeResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(AMAP_STATUS_OK)
    }
}

/// Only the administrative code is used; the remaining geocode fields are ignored
#[derive(Debug, Default, Deserialize)]
pub struct GeocodeRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub adcode: Option<String>,
}

// ============================================================================
// Weather API Response (Internal)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct WeatherInfoResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub info: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lives: Vec<LiveRecord>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub forecasts: Vec<ForecastRecord>,
}

impl WeatherInfoResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(AMAP_STATUS_OK)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LiveRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub temperature: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub humidity: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub windpower: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub winddirection: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weather: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub visibility: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reporttime: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub casts: Vec<CastRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CastRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub week: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dayweather: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nightweather: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub daytemp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nighttemp: Option<String>,
}

// ============================================================================
// Domain records (what the formatter and the plugin work with)
// ============================================================================

/// One validated lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub city: String,
    pub forecast_days: u8,
}

impl LookupRequest {
    /// Trim the city and clamp the requested day count into [1, 7].
    pub fn new(city: &str, days: Option<i64>) -> Result<Self, WeatherError> {
        Ok(Self {
            city: validate_city(city)?,
            forecast_days: clamp_forecast_days(days.unwrap_or(DEFAULT_FORECAST_DAYS as i64)),
        })
    }
}

/// Trimmed city name, or a validation error for blank input
pub fn validate_city(city: &str) -> Result<String, WeatherError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherError::Validation(
            "City name cannot be empty".to_string(),
        ));
    }
    Ok(city.to_string())
}

pub fn clamp_forecast_days(days: i64) -> u8 {
    // the clamp keeps the value inside u8 range
    days.clamp(MIN_FORECAST_DAYS as i64, MAX_FORECAST_DAYS as i64) as u8
}

/// City name paired with the AMap administrative code it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoResolution {
    pub city_name: String,
    pub ad_code: String,
}

/// Current conditions as reported by AMap. Values are kept as provider text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveConditions {
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub wind_power: Option<String>,
    pub wind_direction: Option<String>,
    pub weather: Option<String>,
    pub visibility: Option<String>,
    pub report_time: Option<String>,
}

impl From<LiveRecord> for LiveConditions {
    fn from(r: LiveRecord) -> Self {
        LiveConditions {
            temperature: r.temperature,
            humidity: r.humidity,
            wind_power: r.windpower,
            wind_direction: r.winddirection,
            weather: r.weather,
            visibility: r.visibility,
            report_time: r.reporttime,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastDay {
    pub date: Option<String>,
    pub week: Option<String>,
    pub day_weather: Option<String>,
    pub night_weather: Option<String>,
    pub day_temp: Option<String>,
    pub night_temp: Option<String>,
}

impl From<CastRecord> for ForecastDay {
    fn from(c: CastRecord) -> Self {
        ForecastDay {
            date: c.date,
            week: c.week,
            day_weather: c.dayweather,
            night_weather: c.nightweather,
            day_temp: c.daytemp,
            night_temp: c.nighttemp,
        }
    }
}

/// Result of one successful lookup.
///
/// `live` is always `Some` when built by the service; the formatter still
/// handles `None` and renders a "cannot obtain" line for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    pub city: String,
    pub live: Option<LiveConditions>,
    pub forecast: Vec<ForecastDay>,
}

impl WeatherReport {
    /// Build from a decoded weather response. Returns `None` when the
    /// provider sent no live conditions, whatever the forecast holds.
    pub fn from_response(city: impl Into<String>, data: WeatherInfoResponse) -> Option<Self> {
        let live = data.lives.into_iter().next()?;
        let forecast = data
            .forecasts
            .into_iter()
            .next()
            .map(|f| f.casts.into_iter().map(ForecastDay::from).collect())
            .unwrap_or_default();

        Some(WeatherReport {
            city: city.into(),
            live: Some(live.into()),
            forecast,
        })
    }
}
