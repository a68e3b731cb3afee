//! AMap weather lookup exposed as agent-callable actions.
//!
//! A city name is geocoded to an AMap administrative code, live conditions
//! and the forecast are fetched for that code, and the result is rendered as
//! text for the agent host.

pub mod config;
pub mod error;
pub mod plugin;
pub mod routes;
pub mod weather;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::plugin::WeatherPlugin;

#[derive(Clone)]
pub struct AppState {
    pub plugin: Arc<WeatherPlugin>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            plugin: Arc::new(WeatherPlugin::from_config(config.weather())),
        }
    }
}
