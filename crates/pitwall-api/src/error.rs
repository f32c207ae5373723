//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error renders as `{"error": <reason phrase>, "message": ..., "code": <status>}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match self {
      ApiError::BadRequest(m) | ApiError::NotFound(m) => m,
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store error while serving request");
        "Failed to fetch from the database".to_owned()
      }
    };
    let body = json!({
      "error": status.canonical_reason().unwrap_or_default(),
      "message": message,
      "code": status.as_u16(),
    });
    (status, Json(body)).into_response()
  }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
  (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response()
}
