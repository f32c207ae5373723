//! In-memory doubles for the sync layer's collaborators.

use std::{
  collections::{BTreeMap, HashSet},
  io,
  sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use pitwall_core::{
  cache::ResponseCache,
  domain::{Driver, Race, RaceResult, Season},
  record::{DriverRecord, RaceRecord, RaceWithWinner, ResultRecord, SeasonRecord},
  store::SeasonStore,
};
use pitwall_ergast::{
  SeasonSource,
  types::{
    DriverStanding, RaceResultEntry, RaceTable, SeasonInfo, StandingsList, StandingsTable,
    UpstreamDriver, UpstreamRace,
  },
};

// ─── Fixture builders ────────────────────────────────────────────────────────

fn upstream_driver((id, given, family): (&str, &str, &str)) -> UpstreamDriver {
  UpstreamDriver {
    driver_id:   Some(id.into()),
    given_name:  Some(given.into()),
    family_name: Some(family.into()),
  }
}

pub fn race_json(
  name: &str,
  date: &str,
  time: Option<&str>,
  winner: Option<(&str, &str, &str)>,
) -> UpstreamRace {
  UpstreamRace {
    round:     None,
    race_name: name.into(),
    date:      date.into(),
    time:      time.map(Into::into),
    results:   winner
      .map(|w| {
        vec![RaceResultEntry {
          position: Some("1".into()),
          driver:   Some(upstream_driver(w)),
        }]
      })
      .unwrap_or_default(),
  }
}

pub fn results_table(races: Vec<UpstreamRace>) -> RaceTable { RaceTable { season: None, races } }

pub fn standings_table(leader: Option<(&str, &str, &str)>) -> StandingsTable {
  StandingsTable {
    season:          None,
    standings_lists: vec![StandingsList {
      round:            None,
      driver_standings: leader
        .map(|l| {
          vec![DriverStanding {
            position: Some("1".into()),
            driver:   Some(upstream_driver(l)),
          }]
        })
        .unwrap_or_default(),
    }],
  }
}

// ─── Source ──────────────────────────────────────────────────────────────────

/// Serves canned tables per year and records every fetch.
#[derive(Default)]
pub struct FakeSource {
  listed:  Vec<SeasonInfo>,
  tables:  BTreeMap<String, (RaceTable, StandingsTable)>,
  failing: HashSet<String>,
  calls:   Mutex<Vec<String>>,
}

impl FakeSource {
  pub fn with_season(mut self, year: &str, results: RaceTable, standings: StandingsTable) -> Self {
    self.listed.push(SeasonInfo::new(year, format!("https://example.com/{year}")));
    self.tables.insert(year.to_owned(), (results, standings));
    self
  }

  /// List `year` but answer `503` for its data.
  pub fn failing(mut self, year: &str) -> Self {
    self.listed.push(SeasonInfo::new(year, format!("https://example.com/{year}")));
    self.failing.insert(year.to_owned());
    self
  }

  pub fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().clone() }

  fn record(&self, call: String) { self.calls.lock().unwrap().push(call); }

  fn table(&self, year: &str) -> pitwall_ergast::Result<&(RaceTable, StandingsTable)> {
    if self.failing.contains(year) {
      return Err(pitwall_ergast::Error::Status {
        url:    format!("fake://{year}"),
        status: 503,
      });
    }
    self.tables.get(year).ok_or_else(|| pitwall_ergast::Error::Status {
      url:    format!("fake://{year}"),
      status: 404,
    })
  }
}

impl SeasonSource for FakeSource {
  async fn fetch_seasons(&self) -> pitwall_ergast::Result<Vec<SeasonInfo>> {
    self.record("seasons".into());
    Ok(self.listed.clone())
  }

  async fn fetch_results(&self, year: &str) -> pitwall_ergast::Result<RaceTable> {
    self.record(format!("results:{year}"));
    Ok(self.table(year)?.0.clone())
  }

  async fn fetch_driver_standings(&self, year: &str) -> pitwall_ergast::Result<StandingsTable> {
    self.record(format!("standings:{year}"));
    Ok(self.table(year)?.1.clone())
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct State {
  drivers: Vec<DriverRecord>,
  seasons: Vec<SeasonRecord>,
  races:   Vec<RaceRecord>,
  results: Vec<ResultRecord>,
  calls:   Vec<String>,
}

/// A [`SeasonStore`] over plain vectors that logs every write and winner
/// lookup. Drivers named in `hidden` are never found by id.
#[derive(Default)]
pub struct MemoryStore {
  state:  Mutex<State>,
  hidden: HashSet<String>,
}

impl MemoryStore {
  pub fn hiding(mut self, driver_id: &str) -> Self {
    self.hidden.insert(driver_id.to_owned());
    self
  }

  /// Pre-populate a season row without logging a call.
  pub fn with_season(self, year: i32) -> Self {
    {
      let mut state = self.state.lock().unwrap();
      let id = state.seasons.len() as i64 + 1;
      state.seasons.push(SeasonRecord {
        id,
        year,
        url: String::new(),
        champion_id: None,
      });
    }
    self
  }

  pub fn calls(&self) -> Vec<String> { self.state.lock().unwrap().calls.clone() }

  pub fn season_years(&self) -> Vec<i32> {
    let mut years: Vec<_> = self.state.lock().unwrap().seasons.iter().map(|s| s.year).collect();
    years.sort_unstable();
    years
  }
}

impl SeasonStore for MemoryStore {
  type Error = io::Error;

  async fn upsert_driver(&self, driver: &Driver) -> Result<DriverRecord, io::Error> {
    let mut state = self.state.lock().unwrap();
    state.calls.push(format!("upsert_driver:{}", driver.driver_id));
    if let Some(existing) = state.drivers.iter_mut().find(|d| d.driver_id == driver.driver_id) {
      existing.given_name = driver.given_name.clone();
      existing.family_name = driver.family_name.clone();
      return Ok(existing.clone());
    }
    let record = DriverRecord {
      id:          state.drivers.len() as i64 + 1,
      driver_id:   driver.driver_id.clone(),
      given_name:  driver.given_name.clone(),
      family_name: driver.family_name.clone(),
    };
    state.drivers.push(record.clone());
    Ok(record)
  }

  async fn upsert_season(
    &self,
    season: &Season,
    champion: &DriverRecord,
  ) -> Result<SeasonRecord, io::Error> {
    let mut state = self.state.lock().unwrap();
    state.calls.push(format!("upsert_season:{}", season.year));
    if let Some(existing) = state.seasons.iter_mut().find(|s| s.year == season.year) {
      existing.url = season.url.clone();
      existing.champion_id = Some(champion.id);
      return Ok(existing.clone());
    }
    let record = SeasonRecord {
      id:          state.seasons.len() as i64 + 1,
      year:        season.year,
      url:         season.url.clone(),
      champion_id: Some(champion.id),
    };
    state.seasons.push(record.clone());
    Ok(record)
  }

  async fn bulk_insert_drivers(&self, drivers: &[Driver]) -> Result<usize, io::Error> {
    let mut state = self.state.lock().unwrap();
    state.calls.push(format!("bulk_insert_drivers:{}", drivers.len()));
    let mut inserted = 0;
    for driver in drivers {
      if state.drivers.iter().any(|d| d.driver_id == driver.driver_id) {
        continue;
      }
      let id = state.drivers.len() as i64 + 1;
      state.drivers.push(DriverRecord {
        id,
        driver_id: driver.driver_id.clone(),
        given_name: driver.given_name.clone(),
        family_name: driver.family_name.clone(),
      });
      inserted += 1;
    }
    Ok(inserted)
  }

  async fn upsert_race(&self, race: &Race, season: &SeasonRecord) -> Result<RaceRecord, io::Error> {
    let date = race.starts_at().map_err(io::Error::other)?;
    let mut state = self.state.lock().unwrap();
    state.calls.push(format!("upsert_race:{}", race.race_name));
    if let Some(existing) = state
      .races
      .iter()
      .find(|r| r.race_name == race.race_name && r.season_id == season.id)
    {
      return Ok(existing.clone());
    }
    let record = RaceRecord {
      id: state.races.len() as i64 + 1,
      season_id: season.id,
      race_name: race.race_name.clone(),
      date,
    };
    state.races.push(record.clone());
    Ok(record)
  }

  async fn upsert_result(
    &self,
    race: &RaceRecord,
    winner: &DriverRecord,
    result: &RaceResult,
  ) -> Result<ResultRecord, io::Error> {
    let mut state = self.state.lock().unwrap();
    state.calls.push(format!("upsert_result:{}", race.race_name));
    state.results.retain(|r| r.race_id != race.id);
    let record = ResultRecord {
      id:        state.results.len() as i64 + 1,
      race_id:   race.id,
      winner_id: winner.id,
      position:  result.position,
    };
    state.results.push(record.clone());
    Ok(record)
  }

  async fn find_driver_by_id(&self, driver_id: &str) -> Result<Option<DriverRecord>, io::Error> {
    let mut state = self.state.lock().unwrap();
    state.calls.push(format!("find_driver_by_id:{driver_id}"));
    if self.hidden.contains(driver_id) {
      return Ok(None);
    }
    Ok(state.drivers.iter().find(|d| d.driver_id == driver_id).cloned())
  }

  async fn find_season_by_year(&self, year: i32) -> Result<Option<SeasonRecord>, io::Error> {
    let state = self.state.lock().unwrap();
    Ok(state.seasons.iter().find(|s| s.year == year).cloned())
  }

  async fn list_seasons(&self) -> Result<Vec<SeasonRecord>, io::Error> {
    let mut seasons = self.state.lock().unwrap().seasons.clone();
    seasons.sort_by(|a, b| b.year.cmp(&a.year));
    Ok(seasons)
  }

  async fn races_with_winners(&self, season_id: i64) -> Result<Vec<RaceWithWinner>, io::Error> {
    let state = self.state.lock().unwrap();
    let mut rows: Vec<_> = state
      .races
      .iter()
      .filter(|r| r.season_id == season_id)
      .filter_map(|race| {
        let result = state.results.iter().find(|r| r.race_id == race.id)?;
        let winner = state.drivers.iter().find(|d| d.id == result.winner_id)?;
        Some(RaceWithWinner {
          race:     race.clone(),
          position: result.position,
          winner:   winner.clone(),
        })
      })
      .collect();
    rows.sort_by(|a, b| b.race.date.cmp(&a.race.date));
    Ok(rows)
  }

  async fn count_seasons(&self) -> Result<u64, io::Error> {
    Ok(self.state.lock().unwrap().seasons.len() as u64)
  }

  async fn ping(&self) -> Result<(), io::Error> { Ok(()) }
}

// ─── Cache ───────────────────────────────────────────────────────────────────

/// Counts clears; optionally fails them.
#[derive(Default)]
pub struct CountingCache {
  pub clears: AtomicUsize,
  pub fail:   bool,
}

impl CountingCache {
  pub fn clears(&self) -> usize { self.clears.load(Ordering::SeqCst) }
}

impl ResponseCache for CountingCache {
  type Error = io::Error;

  async fn lookup(&self, _key: &str) -> Result<Option<String>, io::Error> { Ok(None) }

  async fn insert(&self, _key: &str, _body: &str, _ttl: Duration) -> Result<(), io::Error> {
    Ok(())
  }

  async fn clear(&self) -> Result<usize, io::Error> {
    if self.fail {
      return Err(io::Error::other("cache unavailable"));
    }
    self.clears.fetch_add(1, Ordering::SeqCst);
    Ok(3)
  }
}
