mod actions;
pub mod handlers;
mod service;

pub use actions::{
    actions, config_descriptors, plugin_info, ActionDescriptor, ActionError, ConfigDescriptor,
    ParameterDescriptor, PluginInfo, QUERY_WEATHER, QUERY_WEATHER_FORECAST,
};
pub use service::{WeatherPlugin, INVALID_CITY_MESSAGE};
