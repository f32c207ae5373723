//! [`ErgastClient`]: the three upstream endpoints Pitwall reads.

use std::{future::Future, time::Duration};

use reqwest::Client;

use crate::{
  Result,
  fetch::{RequestOptions, RetryPolicy, persistent_get},
  types::{
    DriverStandingsResponse, RaceResultsResponse, RaceTable, SeasonInfo, SeasonsResponse,
    StandingsTable,
  },
};

pub const DEFAULT_BASE_URL: &str = "https://api.jolpi.ca/ergast/f1";

/// The season list is served from 1950; skipping 55 entries starts it at
/// 2005, the first season Pitwall publishes.
pub const SEASONS_OFFSET: u32 = 55;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Anything that can supply upstream season data.
///
/// Implemented by [`ErgastClient`]; the sync layer depends on this trait so
/// it can be driven by fixtures in tests.
pub trait SeasonSource: Send + Sync {
  /// Every season the upstream knows about from 2005 on.
  fn fetch_seasons(&self) -> impl Future<Output = Result<Vec<SeasonInfo>>> + Send + '_;

  /// Winning results of every race of `year`.
  fn fetch_results<'a>(&'a self, year: &'a str)
  -> impl Future<Output = Result<RaceTable>> + Send + 'a;

  /// Championship leader(s) of `year`.
  fn fetch_driver_standings<'a>(
    &'a self,
    year: &'a str,
  ) -> impl Future<Output = Result<StandingsTable>> + Send + 'a;
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async HTTP client for an Ergast-compatible API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ErgastClient {
  client:   Client,
  base_url: String,
  policy:   RetryPolicy,
}

impl ErgastClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .user_agent(concat!("pitwall/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self {
      client,
      base_url: base_url.into(),
      policy: RetryPolicy::default(),
    })
  }

  pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn base_url(&self) -> &str { &self.base_url }

  fn url(&self, path: &str) -> String {
    format!("{}/{}", self.base_url.trim_end_matches('/'), path)
  }

  async fn get<T>(&self, url: &str) -> Result<T>
  where
    T: serde::de::DeserializeOwned,
  {
    persistent_get(&self.client, url, &RequestOptions::default(), &self.policy).await
  }
}

impl SeasonSource for ErgastClient {
  async fn fetch_seasons(&self) -> Result<Vec<SeasonInfo>> {
    let url = self.url(&format!("seasons.json?limit=0&offset={SEASONS_OFFSET}"));
    tracing::info!(%url, "fetching seasons");
    let response: SeasonsResponse = self.get(&url).await?;
    Ok(response.mr_data.season_table.seasons)
  }

  async fn fetch_results(&self, year: &str) -> Result<RaceTable> {
    let url = self.url(&format!("{year}/results/1.json"));
    tracing::info!(%url, "fetching race results");
    let response: RaceResultsResponse = self.get(&url).await?;
    Ok(response.mr_data.race_table)
  }

  async fn fetch_driver_standings(&self, year: &str) -> Result<StandingsTable> {
    let url = self.url(&format!("{year}/driverStandings/1.json"));
    tracing::info!(%url, "fetching driver standings");
    let response: DriverStandingsResponse = self.get(&url).await?;
    Ok(response.mr_data.standings_table)
  }
}
