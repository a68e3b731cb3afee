use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::HttpError;
use crate::impl_into_response;
use crate::weather::models::DEFAULT_FORECAST_DAYS;

pub const QUERY_WEATHER: &str = "query_weather";
pub const QUERY_WEATHER_FORECAST: &str = "query_weather_forecast";

pub const PLUGIN_NAME: &str = "天气查询插件";
pub const PLUGIN_MODULE_NAME: &str = "weather";
pub const PLUGIN_DESCRIPTION: &str = "提供基于高德地图 API 的实时天气和天气预报查询功能";
pub const PLUGIN_AUTHOR: &str = "Yuki";
pub const PLUGIN_URL: &str = "https://github.com/YukiAcerium/nekro-plugin-weather";

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid arguments for {action}: {reason}")]
    InvalidArguments { action: String, reason: String },
}

impl HttpError for ActionError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownAction(_) => StatusCode::NOT_FOUND,
            Self::InvalidArguments { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAction(_) => "UNKNOWN_ACTION",
            Self::InvalidArguments { .. } => "INVALID_ARGUMENTS",
        }
    }

    fn action(&self) -> Option<&str> {
        match self {
            Self::UnknownAction(name) => Some(name),
            Self::InvalidArguments { action, .. } => Some(action),
        }
    }
}

impl_into_response!(ActionError);

/// Arguments of `query_weather`
#[derive(Debug, Deserialize)]
pub struct QueryWeatherArgs {
    pub city: String,
}

/// Arguments of `query_weather_forecast`
#[derive(Debug, Deserialize)]
pub struct QueryForecastArgs {
    pub city: String,
    #[serde(default)]
    pub days: Option<i64>,
}

/// Decode an action's argument object, naming the action on failure
pub fn decode_args<T>(action: &str, args: Value) -> Result<T, ActionError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(args).map_err(|e| ActionError::InvalidArguments {
        action: action.to_string(),
        reason: e.to_string(),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterDescriptor {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub description: &'static str,
}

/// What the agent host shows its model about a callable action
#[derive(Debug, Clone, Serialize)]
pub struct ActionDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterDescriptor>,
}

/// A setting the host asks the operator for when enabling the plugin
#[derive(Debug, Clone, Serialize)]
pub struct ConfigDescriptor {
    pub key: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub default: Value,
    pub is_secret: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PluginInfo {
    pub name: &'static str,
    pub module_name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub author: &'static str,
    pub url: &'static str,
    pub actions: Vec<ActionDescriptor>,
    pub config: Vec<ConfigDescriptor>,
}

fn city_parameter() -> ParameterDescriptor {
    ParameterDescriptor {
        name: "city",
        kind: "string",
        required: true,
        default: None,
        description: "城市名称",
    }
}

/// Descriptors for every action the plugin exposes
pub fn actions() -> Vec<ActionDescriptor> {
    vec![
        ActionDescriptor {
            name: QUERY_WEATHER,
            title: "查询实时天气",
            description: "查询指定城市的实时天气信息，包括温度、湿度、风力等",
            parameters: vec![city_parameter()],
        },
        ActionDescriptor {
            name: QUERY_WEATHER_FORECAST,
            title: "查询天气预报",
            description: "查询指定城市未来几天的天气预报",
            parameters: vec![
                city_parameter(),
                ParameterDescriptor {
                    name: "days",
                    kind: "integer",
                    required: false,
                    default: Some(Value::from(DEFAULT_FORECAST_DAYS)),
                    description: "预报天数，默认3天，最多7天",
                },
            ],
        },
    ]
}

/// Descriptors for the settings in [`crate::config::WeatherConfig`]
pub fn config_descriptors() -> Vec<ConfigDescriptor> {
    vec![
        ConfigDescriptor {
            key: "api_key",
            kind: "string",
            title: "高德地图 API Key",
            description: "在高德开放平台申请的应用 API Key",
            default: Value::from(""),
            is_secret: true,
        },
        ConfigDescriptor {
            key: "api_base_url",
            kind: "string",
            title: "API 基础 URL",
            description: "高德天气 API 的基础 URL",
            default: Value::from(DEFAULT_API_BASE_URL),
            is_secret: false,
        },
        ConfigDescriptor {
            key: "timeout",
            kind: "integer",
            title: "请求超时时间",
            description: "API 请求的超时时间（秒）",
            default: Value::from(DEFAULT_TIMEOUT_SECS),
            is_secret: false,
        },
    ]
}

pub fn plugin_info() -> PluginInfo {
    PluginInfo {
        name: PLUGIN_NAME,
        module_name: PLUGIN_MODULE_NAME,
        description: PLUGIN_DESCRIPTION,
        version: env!("CARGO_PKG_VERSION"),
        author: PLUGIN_AUTHOR,
        url: PLUGIN_URL,
        actions: actions(),
        config: config_descriptors(),
    }
}
