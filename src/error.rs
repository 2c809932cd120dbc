use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::gateway::GatewayError;

/// Failure at the HTTP boundary.
///
/// Every variant is reported the same way: a 500 with the
/// `{"status": "error", "error": ...}` envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("Invalid request: {0}")]
    Request(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        error!(error = %message, "Request failed");

        let body = Json(json!({
            "status": "error",
            "error": message,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_envelope() {
        let err = AppError::Gateway(GatewayError::InvalidThreshold("abc".into()));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["status"], "error");
        assert_eq!(v["error"], "invalid magnitude threshold: \"abc\"");
    }
}
