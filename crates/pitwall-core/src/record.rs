//! Persisted rows as returned by a [`SeasonStore`](crate::store::SeasonStore).
//!
//! Every record carries the store-assigned surrogate `id`; foreign keys point
//! at those ids, never at natural keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRecord {
  pub id:          i64,
  /// External identifier, unique across all seasons.
  pub driver_id:   String,
  pub given_name:  String,
  pub family_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRecord {
  pub id:          i64,
  pub year:        i32,
  pub url:         String,
  pub champion_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceRecord {
  pub id:        i64,
  pub season_id: i64,
  pub race_name: String,
  pub date:      DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
  pub id:        i64,
  pub race_id:   i64,
  pub winner_id: i64,
  pub position:  u32,
}

/// A race joined with its stored result and winning driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceWithWinner {
  pub race:     RaceRecord,
  pub position: u32,
  pub winner:   DriverRecord,
}
