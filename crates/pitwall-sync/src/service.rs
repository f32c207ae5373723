//! [`SyncService`]: fetch, map and persist seasons.

use futures::future::try_join_all;
use pitwall_core::store::SeasonStore;
use pitwall_ergast::{SeasonSource, mapper::map_season, types::SeasonInfo};

use crate::{Error, Result};

/// What one [`SyncService::put_season`] call wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonSummary {
  pub year:             i32,
  /// Drivers that did not exist before this run.
  pub drivers_inserted: usize,
  pub races:            usize,
  pub results:          usize,
  /// Races with no winner, or whose winner could not be found in the store.
  pub results_skipped:  usize,
}

/// Orchestrates the upstream client, the mapper and the store for whole
/// seasons.
pub struct SyncService<U, S> {
  source: U,
  store:  S,
}

impl<U, S> SyncService<U, S>
where
  U: SeasonSource,
  S: SeasonStore,
{
  pub fn new(source: U, store: S) -> Self { Self { source, store } }

  pub fn source(&self) -> &U { &self.source }

  pub fn store(&self) -> &S { &self.store }

  /// Fetch, map and write one season.
  ///
  /// Without a season this logs and returns `Ok(None)` without touching the
  /// upstream or the store. A race with no winner, or whose winner is not in
  /// the store, gets no result; the rest of the season is still written.
  pub async fn put_season(&self, info: Option<&SeasonInfo>) -> Result<Option<SeasonSummary>> {
    let Some(info) = info else {
      tracing::error!("no season provided to put_season");
      return Ok(None);
    };
    tracing::info!(season = %info.season, "putting season");

    let results = self.source.fetch_results(&info.season).await?;
    let standings = self.source.fetch_driver_standings(&info.season).await?;

    let season = map_season(&results, &standings, info)?;

    let champion = self
      .store
      .upsert_driver(&season.champion)
      .await
      .map_err(Error::store)?;
    tracing::info!(year = season.year, champion = %champion.driver_id, "writing season record");
    let season_record = self
      .store
      .upsert_season(&season, &champion)
      .await
      .map_err(Error::store)?;

    let drivers_inserted = self
      .store
      .bulk_insert_drivers(&season.drivers)
      .await
      .map_err(Error::store)?;
    tracing::info!(year = season.year, drivers_inserted, "inserted drivers");

    let mut summary = SeasonSummary {
      year: season.year,
      drivers_inserted,
      ..SeasonSummary::default()
    };

    for race in &season.races {
      let race_record = self
        .store
        .upsert_race(race, &season_record)
        .await
        .map_err(Error::store)?;
      summary.races += 1;

      // No results upstream; a blank champion row must not stand in.
      if race.result.driver_id.is_empty() {
        tracing::debug!(
          year = season.year,
          race = %race.race_name,
          "race has no winner, skipping result"
        );
        summary.results_skipped += 1;
        continue;
      }

      let winner = self
        .store
        .find_driver_by_id(&race.result.driver_id)
        .await
        .map_err(Error::store)?;
      match winner {
        Some(driver) => {
          self
            .store
            .upsert_result(&race_record, &driver, &race.result)
            .await
            .map_err(Error::store)?;
          summary.results += 1;
        }
        None => {
          tracing::debug!(
            year = season.year,
            race = %race.race_name,
            driver_id = %race.result.driver_id,
            "winner not stored, skipping result"
          );
          summary.results_skipped += 1;
        }
      }
    }

    Ok(Some(summary))
  }

  /// Write every upstream season.
  ///
  /// Seasons are processed concurrently; the first failure fails the whole
  /// batch and is returned. Returns `true` once every season succeeded.
  pub async fn put_seasons(&self) -> Result<bool> {
    let seasons = self.source.fetch_seasons().await?;
    tracing::info!(count = seasons.len(), "found seasons to put");

    try_join_all(seasons.iter().map(|info| async move {
      tracing::info!(season = %info.season, "processing season");
      self.put_season(Some(info)).await.inspect_err(|err| {
        tracing::error!(season = %info.season, error = %err, "error processing season");
      })
    }))
    .await?;

    tracing::info!("all seasons processed successfully");
    Ok(true)
  }
}
