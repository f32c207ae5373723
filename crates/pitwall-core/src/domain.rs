//! Domain representation of one season, as produced by the upstream mapper
//! and consumed by a [`SeasonStore`](crate::store::SeasonStore).
//!
//! These types carry natural keys only (driver external id, season year,
//! race name). Surrogate row ids live on the [`record`](crate::record) types.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Position recorded for every stored result; only race winners are tracked.
pub const WINNING_POSITION: u32 = 1;

// ─── Driver ──────────────────────────────────────────────────────────────────

/// A driver keyed by the upstream's stable external identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
  pub driver_id:   String,
  pub given_name:  String,
  pub family_name: String,
}

impl Driver {
  pub fn new(
    driver_id: impl Into<String>,
    given_name: impl Into<String>,
    family_name: impl Into<String>,
  ) -> Self {
    Self {
      driver_id:   driver_id.into(),
      given_name:  given_name.into(),
      family_name: family_name.into(),
    }
  }
}

// ─── Race ────────────────────────────────────────────────────────────────────

/// The winning result of a race, referencing its driver by external id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
  pub driver_id: String,
  pub position:  u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
  pub race_name: String,
  /// `{date}T{time}` as assembled from the upstream payload, e.g.
  /// `2023-03-05T15:00:00Z` or `2023-03-05T00:00:00`.
  pub date:      String,
  pub result:    RaceResult,
}

impl Race {
  /// Parse [`Race::date`] into a UTC instant.
  ///
  /// A trailing `Z` is optional; a date-time without offset is read as UTC.
  pub fn starts_at(&self) -> Result<DateTime<Utc>> { parse_race_date(&self.date) }
}

/// Parse an upstream `{date}T{time}` string into a UTC instant.
pub fn parse_race_date(value: &str) -> Result<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
    return Ok(dt.with_timezone(&Utc));
  }
  NaiveDateTime::parse_from_str(value.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S")
    .map(|naive| naive.and_utc())
    .map_err(|e| Error::InvalidRaceDate {
      value:  value.to_owned(),
      reason: e.to_string(),
    })
}

// ─── Season ──────────────────────────────────────────────────────────────────

/// A fully-mapped season ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
  pub year:     i32,
  pub url:      String,
  /// The driver leading the final (or latest) standings list.
  pub champion: Driver,
  /// Distinct race winners, in first-seen order.
  pub drivers:  Vec<Driver>,
  /// One entry per upstream race, in upstream order.
  pub races:    Vec<Race>,
}

/// Parse an upstream season label (`"2023"`) into a year.
pub fn parse_year(season: &str) -> Result<i32> {
  season
    .trim()
    .parse()
    .map_err(|_| Error::InvalidYear(season.to_owned()))
}
