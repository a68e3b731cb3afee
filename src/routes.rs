use axum::{
    routing::{get, post},
    Router,
};

use crate::plugin::handlers as plugin_handlers;
use crate::AppState;

/// Build the action routes
fn action_routes() -> Router<AppState> {
    Router::new().route("/actions/{name}", post(plugin_handlers::invoke_action))
}

/// Build the complete application router
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/", get(plugin_handlers::health))
        .route("/health", get(plugin_handlers::health))
        .route("/plugin", get(plugin_handlers::plugin_info))
        .merge(action_routes())
}
