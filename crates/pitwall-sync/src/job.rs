//! The scheduled update: refresh the newest season(s), then drop every cached
//! response.

use pitwall_core::{cache::ResponseCache, store::SeasonStore};
use pitwall_ergast::{SeasonSource, types::SeasonInfo};

use crate::{Error, Result, SyncService};

/// How many of the newest upstream seasons are considered per run.
const CANDIDATE_SEASONS: usize = 2;

/// Outcome of one [`run_update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
  /// Years written successfully, in processing order.
  pub synced:        Vec<i32>,
  /// Years whose sync failed. A failure never stops the run.
  pub failed:        Vec<i32>,
  /// Cached responses removed at the end of the run.
  pub cache_cleared: usize,
}

/// Refresh the newest season, plus the one before it while the newest is
/// not yet stored.
///
/// Returns `Ok(None)` without touching the cache when the upstream lists no
/// seasons. Per-season failures are logged and recorded in the report; the
/// cache is cleared regardless.
pub async fn run_update<U, S, C>(
  service: &SyncService<U, S>,
  cache: &C,
) -> Result<Option<UpdateReport>>
where
  U: SeasonSource,
  S: SeasonStore,
  C: ResponseCache,
{
  tracing::info!("starting season update");

  let listed = service.source().fetch_seasons().await?;
  let candidates = newest_first(listed);
  let Some((latest_year, _)) = candidates.first() else {
    tracing::warn!("upstream lists no seasons, nothing to update");
    return Ok(None);
  };
  let latest_year = *latest_year;

  let latest_stored = service
    .store()
    .find_season_by_year(latest_year)
    .await
    .map_err(Error::store)?
    .is_some();
  let take = if latest_stored { 1 } else { CANDIDATE_SEASONS };
  tracing::info!(latest_year, latest_stored, "selected seasons to update");

  let mut report = UpdateReport::default();
  for (year, info) in candidates.iter().take(take) {
    match service.put_season(Some(info)).await {
      Ok(_) => report.synced.push(*year),
      Err(err) => {
        tracing::error!(year, error = %err, "season update failed");
        report.failed.push(*year);
      }
    }
  }

  report.cache_cleared = cache
    .clear()
    .await
    .map_err(|e| Error::Cache(Box::new(e)))?;
  tracing::info!(
    synced = ?report.synced,
    failed = ?report.failed,
    cache_cleared = report.cache_cleared,
    "season update finished"
  );

  Ok(Some(report))
}

/// The newest [`CANDIDATE_SEASONS`] entries, newest first. Entries whose
/// label is not a year are dropped.
fn newest_first(listed: Vec<SeasonInfo>) -> Vec<(i32, SeasonInfo)> {
  let mut seasons: Vec<_> = listed
    .into_iter()
    .filter_map(|info| match info.year() {
      Ok(year) => Some((year, info)),
      Err(err) => {
        tracing::warn!(season = %info.season, error = %err, "ignoring unparseable season");
        None
      }
    })
    .collect();
  seasons.sort_by(|a, b| b.0.cmp(&a.0));
  seasons.truncate(CANDIDATE_SEASONS);
  seasons
}
