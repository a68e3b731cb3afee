use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::actions::{ActionError, PluginInfo};
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub action: String,
    pub result: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Plugin metadata and the actions it exposes
///
/// GET /plugin
pub async fn plugin_info(State(state): State<AppState>) -> Json<PluginInfo> {
    Json(state.plugin.info())
}

/// Run one action. An empty body counts as an empty argument object.
///
/// POST /actions/{name}
pub async fn invoke_action(
    State(state): State<AppState>,
    Path(action): Path<String>,
    body: Bytes,
) -> Result<Json<ActionResponse>, ActionError> {
    let args = parse_args(&action, &body)?;
    let result = state.plugin.invoke(&action, args).await?;

    Ok(Json(ActionResponse { action, result }))
}

fn parse_args(action: &str, body: &[u8]) -> Result<Value, ActionError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(body).map_err(|e| ActionError::InvalidArguments {
        action: action.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_empty_body() {
        assert_eq!(parse_args("query_weather", b"").unwrap(), Value::Object(Map::new()));
        assert_eq!(parse_args("query_weather", b"  \n").unwrap(), Value::Object(Map::new()));
    }

    #[test]
    fn test_parse_args_json_body() {
        let args = parse_args("query_weather", r#"{"city":"杭州"}"#.as_bytes()).unwrap();
        assert_eq!(args["city"], "杭州");
    }

    #[test]
    fn test_parse_args_invalid_json() {
        let err = parse_args("query_weather", b"{city").unwrap_err();
        assert!(matches!(err, ActionError::InvalidArguments { .. }));
    }
}
