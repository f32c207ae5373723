//! `GET /seasons/{season_id}/races`
//!
//! `season_id` is the season's year. Races come back newest first, each with
//! its winner and whether that winner took the season's title.

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::{Datelike as _, SecondsFormat, Utc};
use pitwall_core::{
  record::{RaceWithWinner, SeasonRecord},
  store::SeasonStore,
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

/// Earliest season the API serves.
pub const FIRST_SEASON: i32 = 2005;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverView {
  /// The external driver id, not the store's surrogate key.
  pub id:                 String,
  pub given_name:         String,
  pub family_name:        String,
  pub is_season_champion: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceView {
  pub id:     i64,
  pub name:   String,
  /// RFC 3339, millisecond precision, `Z` suffix.
  pub date:   String,
  pub season: i32,
  pub driver: DriverView,
}

impl RaceView {
  pub fn new(row: &RaceWithWinner, season: &SeasonRecord) -> Self {
    Self {
      id:     row.race.id,
      name:   row.race.race_name.clone(),
      date:   row.race.date.to_rfc3339_opts(SecondsFormat::Millis, true),
      season: season.year,
      driver: DriverView {
        id:                 row.winner.driver_id.clone(),
        given_name:         row.winner.given_name.clone(),
        family_name:        row.winner.family_name.clone(),
        is_season_champion: season.champion_id == Some(row.winner.id),
      },
    }
  }
}

/// Parse a `season_id` path segment: digits only, within
/// `FIRST_SEASON..=current_year`.
pub fn validate_season_id(raw: &str, current_year: i32) -> Result<i32, ApiError> {
  let invalid = || {
    ApiError::BadRequest(format!(
      "seasonId must be an integer between {FIRST_SEASON} and {current_year} (got: \"{raw}\")"
    ))
  };
  if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
    return Err(invalid());
  }
  let year: i32 = raw.parse().map_err(|_| invalid())?;
  if !(FIRST_SEASON..=current_year).contains(&year) {
    return Err(invalid());
  }
  Ok(year)
}

pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Path(season_id): Path<String>,
) -> Result<Json<Vec<RaceView>>, ApiError>
where
  S: SeasonStore + 'static,
{
  let year = validate_season_id(&season_id, Utc::now().year())?;
  let not_found = || ApiError::NotFound(format!("Season with year {year} not found or has no races."));

  let season = state
    .store
    .find_season_by_year(year)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;

  let rows = state
    .store
    .races_with_winners(season.id)
    .await
    .map_err(ApiError::store)?;
  if rows.is_empty() {
    return Err(not_found());
  }

  Ok(Json(rows.iter().map(|row| RaceView::new(row, &season)).collect()))
}
