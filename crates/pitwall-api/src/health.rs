//! `GET /health`

use axum::{Json, extract::State};
use pitwall_core::store::SeasonStore;
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
  pub status: String,
  /// Seconds since the router was built.
  pub uptime: f64,
}

/// Liveness plus a round trip to the store.
pub async fn handler<S>(State(state): State<ApiState<S>>) -> Result<Json<Health>, ApiError>
where
  S: SeasonStore + 'static,
{
  state.store.ping().await.map_err(ApiError::store)?;
  Ok(Json(Health {
    status: "ok".into(),
    uptime: state.started.elapsed().as_secs_f64(),
  }))
}
