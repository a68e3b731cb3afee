pub mod format;
pub mod models;
mod service;

pub use format::{format_report, FORECAST_DISPLAY_LIMIT};
pub use models::{
    clamp_forecast_days, validate_city, ForecastDay, GeoResolution, LiveConditions,
    LookupRequest, WeatherReport,
};
pub use service::{WeatherError, WeatherLookup, WeatherService};
