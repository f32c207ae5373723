//! JSON REST API for Pitwall.
//!
//! Exposes an axum [`Router`] backed by any store implementing both
//! [`SeasonStore`] and [`ResponseCache`].
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/api/health` | Pings the store |
//! | `GET`  | `/api/seasons` | Newest first |
//! | `GET`  | `/api/seasons/{season_id}/races` | `season_id` is a year; 400 if out of range, 404 if empty |

pub mod cache;
pub mod error;
pub mod health;
pub mod races;
pub mod seasons;
pub mod state;

use axum::{
  Router,
  http::{HeaderName, HeaderValue, Method, header},
  middleware::from_fn_with_state,
  routing::get,
};
use pitwall_core::{cache::ResponseCache, store::SeasonStore};
use tower_http::{
  cors::{AllowOrigin, Any, CorsLayer},
  set_header::SetResponseHeaderLayer,
  trace::TraceLayer,
};

pub use error::ApiError;
pub use state::{ApiConfig, ApiState};

/// The `/api` routes, relative to their mount point.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: SeasonStore + 'static,
{
  Router::new()
    .route("/health", get(health::handler::<S>))
    .route("/seasons", get(seasons::list::<S>))
    .route("/seasons/{season_id}/races", get(races::list::<S>))
    .with_state(state)
}

/// The complete application: `/api` routes, JSON 404 fallback, response
/// cache, security headers, CORS and request tracing.
pub fn app<S>(state: ApiState<S>) -> Router<()>
where
  S: SeasonStore + ResponseCache + 'static,
{
  let cors = match &state.config.cors_origin {
    Some(origin) => CorsLayer::new().allow_origin(AllowOrigin::exact(origin.clone())),
    None => CorsLayer::new().allow_origin(Any),
  }
  .allow_methods([Method::GET, Method::OPTIONS]);

  Router::new()
    .nest("/api", api_router(state.clone()))
    .fallback(error::not_found)
    .layer(from_fn_with_state(state, cache::response_cache::<S>))
    .layer(security_header(header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
    .layer(security_header(header::X_FRAME_OPTIONS, "SAMEORIGIN"))
    .layer(security_header(header::REFERRER_POLICY, "no-referrer"))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}

fn security_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
  SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}
