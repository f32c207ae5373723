//! Read-through response cache middleware.
//!
//! `GET` responses (health checks excluded) are looked up under
//! `cache:{path_and_query}`. On a miss the request runs normally and a `200`
//! body is stored for [`ApiConfig::cache_ttl`](crate::ApiConfig). Cache
//! failures are logged and the request proceeds uncached.

use axum::{
  body::{Body, to_bytes},
  extract::{Request, State},
  http::{HeaderValue, Method, StatusCode, Uri, header},
  middleware::Next,
  response::{IntoResponse, Response},
};
use pitwall_core::cache::ResponseCache;

use crate::ApiState;

const KEY_PREFIX: &str = "cache:";

/// The cache key for `uri`.
pub fn cache_key(uri: &Uri) -> String {
  let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or_else(|| uri.path());
  format!("{KEY_PREFIX}{path}")
}

fn is_cacheable(req: &Request) -> bool {
  req.method() == Method::GET && !req.uri().path().contains("health")
}

pub async fn response_cache<S>(State(state): State<ApiState<S>>, req: Request, next: Next) -> Response
where
  S: ResponseCache + 'static,
{
  if !is_cacheable(&req) {
    return next.run(req).await;
  }

  let key = cache_key(req.uri());
  match state.store.lookup(&key).await {
    Ok(Some(body)) => {
      tracing::debug!(%key, "cache hit");
      return (
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
      )
        .into_response();
    }
    Ok(None) => tracing::debug!(%key, "cache miss"),
    Err(err) => tracing::warn!(%key, error = %err, "cache lookup failed"),
  }

  let response = next.run(req).await;
  if response.status() != StatusCode::OK {
    return response;
  }

  let (parts, body) = response.into_parts();
  let bytes = match to_bytes(body, usize::MAX).await {
    Ok(bytes) => bytes,
    Err(err) => {
      tracing::error!(%key, error = %err, "failed to buffer response body");
      return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
  };

  match std::str::from_utf8(&bytes) {
    Ok(text) => {
      if let Err(err) = state.store.insert(&key, text, state.config.cache_ttl).await {
        tracing::warn!(%key, error = %err, "failed to cache response");
      }
    }
    Err(_) => tracing::warn!(%key, "response body is not UTF-8, not caching"),
  }

  Response::from_parts(parts, Body::from(bytes))
}
