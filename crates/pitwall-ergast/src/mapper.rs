//! Flatten one season's upstream payloads into a domain [`Season`].

use std::collections::HashSet;

use pitwall_core::{
  Result,
  domain::{Driver, Race, RaceResult, Season, WINNING_POSITION},
};

use crate::types::{RaceTable, SeasonInfo, StandingsTable, UpstreamDriver, UpstreamRace};

/// Time of day assumed when the upstream omits it.
pub const DEFAULT_RACE_TIME: &str = "00:00:00";

/// Build a [`Season`] from the race-results table, the standings table and
/// the season list entry.
///
/// Missing champion or winner data never fails the mapping: each absent
/// name field becomes an empty string. The only error is a season label
/// that is not a year.
pub fn map_season(
  results: &RaceTable,
  standings: &StandingsTable,
  info: &SeasonInfo,
) -> Result<Season> {
  let year = info.year()?;

  let champion = standings
    .standings_lists
    .first()
    .and_then(|list| list.driver_standings.first())
    .and_then(|standing| standing.driver.as_ref())
    .map(to_driver)
    .unwrap_or_default();

  let mut seen = HashSet::new();
  let mut drivers = Vec::new();
  let mut races = Vec::with_capacity(results.races.len());

  for race in &results.races {
    let winner = winner_of(race);
    // A race without results has no winner to register.
    if !winner.driver_id.is_empty() && seen.insert(winner.driver_id.clone()) {
      drivers.push(winner.clone());
    }
    races.push(Race {
      race_name: race.race_name.clone(),
      date:      race_date(race),
      result:    RaceResult {
        driver_id: winner.driver_id,
        position:  WINNING_POSITION,
      },
    });
  }

  Ok(Season {
    year,
    url: info.url.clone(),
    champion,
    drivers,
    races,
  })
}

fn to_driver(upstream: &UpstreamDriver) -> Driver {
  Driver {
    driver_id:   upstream.driver_id.clone().unwrap_or_default(),
    given_name:  upstream.given_name.clone().unwrap_or_default(),
    family_name: upstream.family_name.clone().unwrap_or_default(),
  }
}

fn winner_of(race: &UpstreamRace) -> Driver {
  race
    .results
    .first()
    .and_then(|entry| entry.driver.as_ref())
    .map(to_driver)
    .unwrap_or_default()
}

fn race_date(race: &UpstreamRace) -> String {
  let time = race
    .time
    .as_deref()
    .filter(|t| !t.is_empty())
    .unwrap_or(DEFAULT_RACE_TIME);
  format!("{}T{time}", race.date)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{DriverStanding, RaceResultEntry, StandingsList};

  fn upstream_driver(id: &str, given: &str, family: &str) -> UpstreamDriver {
    UpstreamDriver {
      driver_id:   Some(id.into()),
      given_name:  Some(given.into()),
      family_name: Some(family.into()),
    }
  }

  fn upstream_race(name: &str, date: &str, time: Option<&str>, winner: Option<UpstreamDriver>) -> UpstreamRace {
    UpstreamRace {
      round:     None,
      race_name: name.into(),
      date:      date.into(),
      time:      time.map(Into::into),
      results:   winner
        .map(|d| {
          vec![RaceResultEntry {
            position: Some("1".into()),
            driver:   Some(d),
          }]
        })
        .unwrap_or_default(),
    }
  }

  fn standings_led_by(driver: UpstreamDriver) -> StandingsTable {
    StandingsTable {
      season:          Some("2023".into()),
      standings_lists: vec![StandingsList {
        round:            None,
        driver_standings: vec![DriverStanding {
          position: Some("1".into()),
          driver:   Some(driver),
        }],
      }],
    }
  }

  fn info() -> SeasonInfo { SeasonInfo::new("2023", "https://example.com/2023") }

  #[test]
  fn maps_champion_races_and_drivers() {
    let results = RaceTable {
      season: Some("2023".into()),
      races:  vec![
        upstream_race(
          "Bahrain Grand Prix",
          "2023-03-05",
          Some("15:00:00Z"),
          Some(upstream_driver("max_verstappen", "Max", "Verstappen")),
        ),
        upstream_race(
          "Saudi Arabian Grand Prix",
          "2023-03-19",
          Some("17:00:00Z"),
          Some(upstream_driver("perez", "Sergio", "Pérez")),
        ),
      ],
    };
    let standings = standings_led_by(upstream_driver("max_verstappen", "Max", "Verstappen"));

    let season = map_season(&results, &standings, &info()).unwrap();

    assert_eq!(season.year, 2023);
    assert_eq!(season.url, "https://example.com/2023");
    assert_eq!(season.champion, Driver::new("max_verstappen", "Max", "Verstappen"));
    assert_eq!(season.drivers.len(), 2);
    assert_eq!(season.races.len(), 2);
    assert_eq!(season.races[0].race_name, "Bahrain Grand Prix");
    assert_eq!(season.races[0].date, "2023-03-05T15:00:00Z");
    assert_eq!(season.races[1].result.driver_id, "perez");
    assert!(season.races.iter().all(|r| r.result.position == 1));
  }

  #[test]
  fn deduplicates_repeat_winners_keeping_first_names() {
    let results = RaceTable {
      season: None,
      races:  vec![
        upstream_race("A", "2020-01-01", None, Some(upstream_driver("hamilton", "Lewis", "Hamilton"))),
        upstream_race("B", "2020-01-08", None, Some(upstream_driver("hamilton", "L.", "Hamilton"))),
      ],
    };

    let season = map_season(&results, &StandingsTable::default(), &info()).unwrap();

    assert_eq!(season.drivers, vec![Driver::new("hamilton", "Lewis", "Hamilton")]);
    assert_eq!(season.races.len(), 2);
  }

  #[test]
  fn missing_time_defaults_to_midnight() {
    let results = RaceTable {
      season: None,
      races:  vec![upstream_race(
        "Bahrain Grand Prix",
        "2023-03-05",
        None,
        Some(upstream_driver("max_verstappen", "Max", "Verstappen")),
      )],
    };

    let season = map_season(&results, &StandingsTable::default(), &info()).unwrap();
    assert_eq!(season.races[0].date, "2023-03-05T00:00:00");
    assert!(season.races[0].date.ends_with("T00:00:00"));
  }

  #[test]
  fn empty_standings_yield_blank_champion() {
    let season = map_season(&RaceTable::default(), &StandingsTable::default(), &info()).unwrap();
    assert_eq!(season.champion, Driver::new("", "", ""));
    assert!(season.races.is_empty());
    assert!(season.drivers.is_empty());
  }

  #[test]
  fn partially_missing_champion_fields_default_independently() {
    let standings = standings_led_by(UpstreamDriver {
      driver_id:   Some("alonso".into()),
      given_name:  None,
      family_name: Some("Alonso".into()),
    });
    let season = map_season(&RaceTable::default(), &standings, &info()).unwrap();
    assert_eq!(season.champion, Driver::new("alonso", "", "Alonso"));
  }

  #[test]
  fn race_without_results_has_blank_winner_and_no_driver_entry() {
    let results = RaceTable {
      season: None,
      races:  vec![upstream_race("Cancelled Grand Prix", "2020-04-05", None, None)],
    };

    let season = map_season(&results, &StandingsTable::default(), &info()).unwrap();
    assert_eq!(season.races[0].result.driver_id, "");
    assert!(season.drivers.is_empty());
  }

  #[test]
  fn non_numeric_season_is_an_error() {
    let err = map_season(
      &RaceTable::default(),
      &StandingsTable::default(),
      &SeasonInfo::new("current", ""),
    )
    .unwrap_err();
    assert!(matches!(err, pitwall_core::Error::InvalidYear(_)));
  }
}
