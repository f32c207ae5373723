//! `GET /seasons`

use axum::{Json, extract::State};
use pitwall_core::{record::SeasonRecord, store::SeasonStore};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonView {
  pub id:   i64,
  pub year: i32,
  pub url:  String,
}

impl From<SeasonRecord> for SeasonView {
  fn from(record: SeasonRecord) -> Self {
    Self {
      id:   record.id,
      year: record.year,
      url:  record.url,
    }
  }
}

/// Every stored season, newest first.
pub async fn list<S>(State(state): State<ApiState<S>>) -> Result<Json<Vec<SeasonView>>, ApiError>
where
  S: SeasonStore + 'static,
{
  let seasons = state.store.list_seasons().await.map_err(ApiError::store)?;
  Ok(Json(seasons.into_iter().map(SeasonView::from).collect()))
}
