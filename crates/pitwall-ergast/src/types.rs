//! Upstream response envelopes.
//!
//! Only the fields Pitwall reads are modelled; everything else in the
//! payload is ignored. Any field the upstream may omit is either an `Option`
//! or defaults to empty, so a sparse payload still decodes and the mapper
//! decides what absence means.

use serde::{Deserialize, Serialize};

// ─── Seasons ─────────────────────────────────────────────────────────────────

/// `GET /seasons.json`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SeasonsResponse {
  #[serde(rename = "MRData")]
  pub mr_data: SeasonsData,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SeasonsData {
  #[serde(rename = "SeasonTable", default)]
  pub season_table: SeasonTable,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SeasonTable {
  #[serde(rename = "Seasons", default)]
  pub seasons: Vec<SeasonInfo>,
}

/// One entry of the upstream season list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeasonInfo {
  /// The year, as the upstream spells it (`"2023"`).
  pub season: String,
  #[serde(default)]
  pub url:    String,
}

impl SeasonInfo {
  pub fn new(season: impl Into<String>, url: impl Into<String>) -> Self {
    Self { season: season.into(), url: url.into() }
  }

  pub fn year(&self) -> pitwall_core::Result<i32> { pitwall_core::domain::parse_year(&self.season) }
}

// ─── Drivers ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamDriver {
  #[serde(default)]
  pub driver_id:   Option<String>,
  #[serde(default)]
  pub given_name:  Option<String>,
  #[serde(default)]
  pub family_name: Option<String>,
}

// ─── Race results ────────────────────────────────────────────────────────────

/// `GET /{year}/results/1.json`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RaceResultsResponse {
  #[serde(rename = "MRData")]
  pub mr_data: RaceResultsData,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RaceResultsData {
  #[serde(rename = "RaceTable", default)]
  pub race_table: RaceTable,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RaceTable {
  #[serde(default)]
  pub season: Option<String>,
  #[serde(rename = "Races", default)]
  pub races:  Vec<UpstreamRace>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamRace {
  #[serde(default)]
  pub round:     Option<String>,
  #[serde(default)]
  pub race_name: String,
  /// `YYYY-MM-DD`
  #[serde(default)]
  pub date:      String,
  /// `HH:MM:SSZ`; absent for older seasons.
  #[serde(default)]
  pub time:      Option<String>,
  /// Finishing order; the first entry is the winner.
  #[serde(rename = "Results", default)]
  pub results:   Vec<RaceResultEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RaceResultEntry {
  #[serde(default)]
  pub position: Option<String>,
  #[serde(rename = "Driver", default)]
  pub driver:   Option<UpstreamDriver>,
}

// ─── Driver standings ────────────────────────────────────────────────────────

/// `GET /{year}/driverStandings/1.json`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DriverStandingsResponse {
  #[serde(rename = "MRData")]
  pub mr_data: DriverStandingsData,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DriverStandingsData {
  #[serde(rename = "StandingsTable", default)]
  pub standings_table: StandingsTable,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StandingsTable {
  #[serde(default)]
  pub season:          Option<String>,
  #[serde(rename = "StandingsLists", default)]
  pub standings_lists: Vec<StandingsList>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StandingsList {
  #[serde(default)]
  pub round:            Option<String>,
  /// Championship order; the first entry is the (current) leader.
  #[serde(rename = "DriverStandings", default)]
  pub driver_standings: Vec<DriverStanding>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DriverStanding {
  #[serde(default)]
  pub position: Option<String>,
  #[serde(rename = "Driver", default)]
  pub driver:   Option<UpstreamDriver>,
}
