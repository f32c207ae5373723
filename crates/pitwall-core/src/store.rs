//! The `SeasonStore` trait.
//!
//! Implemented by storage backends (e.g. `pitwall-store-sqlite`). The sync
//! pipeline and the API depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  domain::{Driver, Race, RaceResult, Season},
  record::{DriverRecord, RaceRecord, RaceWithWinner, ResultRecord, SeasonRecord},
};

/// Abstraction over the relational store holding drivers, seasons, races and
/// results.
///
/// Every write is an upsert keyed on a natural key, so replaying a sync run
/// never duplicates rows. Nothing is ever deleted.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers and spawned tasks.
pub trait SeasonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert a driver, or update its names if the external id already exists.
  fn upsert_driver<'a>(
    &'a self,
    driver: &'a Driver,
  ) -> impl Future<Output = Result<DriverRecord, Self::Error>> + Send + 'a;

  /// Insert a season, or update its URL and champion if the year exists.
  fn upsert_season<'a>(
    &'a self,
    season: &'a Season,
    champion: &'a DriverRecord,
  ) -> impl Future<Output = Result<SeasonRecord, Self::Error>> + Send + 'a;

  /// Insert every driver whose external id is not stored yet. Existing rows
  /// are left untouched. Returns the number of rows actually inserted.
  fn bulk_insert_drivers<'a>(
    &'a self,
    drivers: &'a [Driver],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Insert a race unless `(race_name, season)` already exists, in which case
  /// the stored row is returned unchanged.
  fn upsert_race<'a>(
    &'a self,
    race: &'a Race,
    season: &'a SeasonRecord,
  ) -> impl Future<Output = Result<RaceRecord, Self::Error>> + Send + 'a;

  /// Insert the result of a race, or replace its driver and position.
  fn upsert_result<'a>(
    &'a self,
    race: &'a RaceRecord,
    driver: &'a DriverRecord,
    result: &'a RaceResult,
  ) -> impl Future<Output = Result<ResultRecord, Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Look a driver up by external id. Returns `None` if not found.
  fn find_driver_by_id<'a>(
    &'a self,
    driver_id: &'a str,
  ) -> impl Future<Output = Result<Option<DriverRecord>, Self::Error>> + Send + 'a;

  /// Look a season up by year. Returns `None` if not found.
  fn find_season_by_year(
    &self,
    year: i32,
  ) -> impl Future<Output = Result<Option<SeasonRecord>, Self::Error>> + Send + '_;

  /// All stored seasons, most recent year first.
  fn list_seasons(
    &self,
  ) -> impl Future<Output = Result<Vec<SeasonRecord>, Self::Error>> + Send + '_;

  /// Races of a season that have a stored result, latest date first.
  fn races_with_winners(
    &self,
    season_id: i64,
  ) -> impl Future<Output = Result<Vec<RaceWithWinner>, Self::Error>> + Send + '_;

  fn count_seasons(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Round-trip a trivial query to prove the store is reachable.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
