//! Encoding and decoding helpers between domain records and the plain
//! column values stored in SQLite.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings in UTC so that
//! lexical order matches chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use pitwall_core::record::{DriverRecord, RaceRecord, RaceWithWinner, SeasonRecord};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row mappers ─────────────────────────────────────────────────────────────

pub const DRIVER_COLUMNS: &str = "id, driver_id, given_name, family_name";
pub const SEASON_COLUMNS: &str = "id, year, url, champion_id";
pub const RACE_COLUMNS: &str = "id, season_id, race_name, date";

pub fn driver_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DriverRecord> {
  Ok(DriverRecord {
    id:          row.get(0)?,
    driver_id:   row.get(1)?,
    given_name:  row.get(2)?,
    family_name: row.get(3)?,
  })
}

pub fn season_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SeasonRecord> {
  Ok(SeasonRecord {
    id:          row.get(0)?,
    year:        row.get(1)?,
    url:         row.get(2)?,
    champion_id: row.get(3)?,
  })
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// A `races` row with its date still in column form.
pub struct RawRace {
  pub id:        i64,
  pub season_id: i64,
  pub race_name: String,
  pub date:      String,
}

impl RawRace {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      season_id: row.get(1)?,
      race_name: row.get(2)?,
      date:      row.get(3)?,
    })
  }

  pub fn into_record(self) -> Result<RaceRecord> {
    Ok(RaceRecord {
      id:        self.id,
      season_id: self.season_id,
      race_name: self.race_name,
      date:      decode_dt(&self.date)?,
    })
  }
}

/// A `races` row joined with `results` and the winning `drivers` row.
pub struct RawRaceWithWinner {
  pub race:     RawRace,
  pub position: u32,
  pub winner:   DriverRecord,
}

impl RawRaceWithWinner {
  /// Expects the race columns at 0..4, `position` at 4 and the driver
  /// columns at 5..9.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      race:     RawRace::from_row(row)?,
      position: row.get(4)?,
      winner:   DriverRecord {
        id:          row.get(5)?,
        driver_id:   row.get(6)?,
        given_name:  row.get(7)?,
        family_name: row.get(8)?,
      },
    })
  }

  pub fn into_record(self) -> Result<RaceWithWinner> {
    Ok(RaceWithWinner {
      race:     self.race.into_record()?,
      position: self.position,
      winner:   self.winner,
    })
  }
}
