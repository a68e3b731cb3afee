use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Body sent to the agent host when an action call is rejected.
///
/// Lookup failures never produce this; they are answered with text.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// A rejection of a host call that maps onto an HTTP status
pub trait HttpError: std::error::Error {
    fn status_code(&self) -> StatusCode;

    /// Stable code the host can match on, e.g. `UNKNOWN_ACTION`
    fn error_code(&self) -> &'static str;

    /// The action the host asked for
    fn action(&self) -> Option<&str> {
        None
    }

    fn to_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
            action: self.action().map(str::to_string),
        }
    }
}

pub fn into_response<E: HttpError>(err: E) -> Response {
    let status = err.status_code();
    let body = err.to_body();

    tracing::warn!(
        action = body.action.as_deref().unwrap_or("-"),
        code = %body.code,
        status = %status,
        error = %body.error,
        "Action call rejected"
    );

    (status, Json(body)).into_response()
}

#[macro_export]
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                $crate::error::into_response(self)
            }
        }
    };
}
