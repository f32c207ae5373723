//! Shared handler state.

use std::{sync::Arc, time::{Duration, Instant}};

use axum::http::HeaderValue;

/// Knobs the router needs from the server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// Lifetime of a cached `200` response.
  pub cache_ttl:   Duration,
  /// Allowed CORS origin; `None` allows any.
  pub cors_origin: Option<HeaderValue>,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      cache_ttl:   Duration::from_secs(86_400),
      cors_origin: None,
    }
  }
}

/// State threaded through every handler and the cache middleware.
pub struct ApiState<S> {
  pub store:   Arc<S>,
  pub config:  Arc<ApiConfig>,
  pub started: Instant,
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>, config: ApiConfig) -> Self {
    Self {
      store,
      config: Arc::new(config),
      started: Instant::now(),
    }
  }
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:   self.store.clone(),
      config:  self.config.clone(),
      started: self.started,
    }
  }
}
