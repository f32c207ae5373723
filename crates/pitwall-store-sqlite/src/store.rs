//! [`SqliteStore`]: the SQLite implementation of [`SeasonStore`] and
//! [`ResponseCache`].

use std::{path::Path, time::Duration};

use chrono::{Datelike as _, TimeDelta, Utc};
use rusqlite::OptionalExtension as _;

use pitwall_core::{
  cache::ResponseCache,
  domain::{Driver, Race, RaceResult, Season},
  record::{DriverRecord, RaceRecord, RaceWithWinner, ResultRecord, SeasonRecord},
  store::SeasonStore,
};

use crate::{
  Result,
  encode::{
    DRIVER_COLUMNS, RACE_COLUMNS, RawRace, RawRaceWithWinner, SEASON_COLUMNS, driver_from_row,
    encode_dt, season_from_row,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Pitwall store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store; useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch a result row by race id. Test-only inspection helper.
  #[cfg(test)]
  pub(crate) async fn result_for_race(&self, race_id: i64) -> Result<Option<ResultRecord>> {
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                "SELECT id, race_id, winner_id, position FROM results WHERE race_id = ?1",
                rusqlite::params![race_id],
                |row| {
                  Ok(ResultRecord {
                    id:        row.get(0)?,
                    race_id:   row.get(1)?,
                    winner_id: row.get(2)?,
                    position:  row.get(3)?,
                  })
                },
              )
              .optional()?,
          )
        })
        .await?,
    )
  }

  /// All races of a season regardless of results. Test-only inspection
  /// helper.
  #[cfg(test)]
  pub(crate) async fn races_of_season(&self, season_id: i64) -> Result<Vec<RaceRecord>> {
    let raws: Vec<RawRace> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RACE_COLUMNS} FROM races WHERE season_id = ?1 ORDER BY date"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![season_id], RawRace::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawRace::into_record).collect()
  }
}

// ─── SeasonStore impl ────────────────────────────────────────────────────────

impl SeasonStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn upsert_driver(&self, driver: &Driver) -> Result<DriverRecord> {
    let driver = driver.clone();

    let record = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO drivers (driver_id, given_name, family_name)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (driver_id) DO UPDATE SET
               given_name  = excluded.given_name,
               family_name = excluded.family_name
             RETURNING {DRIVER_COLUMNS}"
          ),
          rusqlite::params![driver.driver_id, driver.given_name, driver.family_name],
          driver_from_row,
        )?)
      })
      .await?;

    Ok(record)
  }

  async fn upsert_season(&self, season: &Season, champion: &DriverRecord) -> Result<SeasonRecord> {
    let year        = season.year;
    let url         = season.url.clone();
    let champion_id = champion.id;

    let record = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO seasons (year, url, champion_id)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (year) DO UPDATE SET
               url         = excluded.url,
               champion_id = excluded.champion_id
             RETURNING {SEASON_COLUMNS}"
          ),
          rusqlite::params![year, url, champion_id],
          season_from_row,
        )?)
      })
      .await?;

    Ok(record)
  }

  async fn bulk_insert_drivers(&self, drivers: &[Driver]) -> Result<usize> {
    let drivers = drivers.to_vec();

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO drivers (driver_id, given_name, family_name)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (driver_id) DO NOTHING",
          )?;
          for d in &drivers {
            inserted += stmt.execute(rusqlite::params![d.driver_id, d.given_name, d.family_name])?;
          }
        }
        tx.commit()?;
        Ok(inserted)
      })
      .await?;

    Ok(inserted)
  }

  async fn upsert_race(&self, race: &Race, season: &SeasonRecord) -> Result<RaceRecord> {
    let race_name = race.race_name.clone();
    let date_str  = encode_dt(race.starts_at()?);
    let season_id = season.id;

    // The no-op assignment makes RETURNING yield the existing row on
    // conflict, leaving its date untouched.
    let raw: RawRace = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO races (season_id, race_name, date)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (race_name, season_id) DO UPDATE SET
               race_name = races.race_name
             RETURNING {RACE_COLUMNS}"
          ),
          rusqlite::params![season_id, race_name, date_str],
          RawRace::from_row,
        )?)
      })
      .await?;

    raw.into_record()
  }

  async fn upsert_result(
    &self,
    race: &RaceRecord,
    driver: &DriverRecord,
    result: &RaceResult,
  ) -> Result<ResultRecord> {
    let race_id   = race.id;
    let winner_id = driver.id;
    let position  = result.position;

    let record = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "INSERT INTO results (race_id, winner_id, position)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (race_id) DO UPDATE SET
             winner_id = excluded.winner_id,
             position  = excluded.position
           RETURNING id, race_id, winner_id, position",
          rusqlite::params![race_id, winner_id, position],
          |row| {
            Ok(ResultRecord {
              id:        row.get(0)?,
              race_id:   row.get(1)?,
              winner_id: row.get(2)?,
              position:  row.get(3)?,
            })
          },
        )?)
      })
      .await?;

    Ok(record)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn find_driver_by_id(&self, driver_id: &str) -> Result<Option<DriverRecord>> {
    let driver_id = driver_id.to_owned();

    let record = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {DRIVER_COLUMNS} FROM drivers WHERE driver_id = ?1"),
              rusqlite::params![driver_id],
              driver_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(record)
  }

  async fn find_season_by_year(&self, year: i32) -> Result<Option<SeasonRecord>> {
    let record = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {SEASON_COLUMNS} FROM seasons WHERE year = ?1"),
              rusqlite::params![year],
              season_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(record)
  }

  async fn list_seasons(&self) -> Result<Vec<SeasonRecord>> {
    let records = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {SEASON_COLUMNS} FROM seasons ORDER BY year DESC"))?;
        let rows = stmt
          .query_map([], season_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(records)
  }

  async fn races_with_winners(&self, season_id: i64) -> Result<Vec<RaceWithWinner>> {
    let raws: Vec<RawRaceWithWinner> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT
             r.id, r.season_id, r.race_name, r.date,
             res.position,
             d.id, d.driver_id, d.given_name, d.family_name
           FROM races r
           JOIN results res ON res.race_id = r.id
           JOIN drivers d   ON d.id        = res.winner_id
           WHERE r.season_id = ?1
           ORDER BY r.date DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![season_id], RawRaceWithWinner::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRaceWithWinner::into_record).collect()
  }

  async fn count_seasons(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM seasons", [], |row| row.get(0))?))
      .await?;
    Ok(count.max(0) as u64)
  }

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ResponseCache impl ──────────────────────────────────────────────────────

impl ResponseCache for SqliteStore {
  type Error = crate::Error;

  async fn lookup(&self, key: &str) -> Result<Option<String>> {
    let key     = key.to_owned();
    let now_str = encode_dt(Utc::now());

    let body = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT body FROM response_cache WHERE cache_key = ?1 AND expires_at > ?2",
              rusqlite::params![key, now_str],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(body)
  }

  async fn insert(&self, key: &str, body: &str, ttl: Duration) -> Result<()> {
    let now = Utc::now();
    let expires_at = TimeDelta::from_std(ttl)
      .ok()
      .and_then(|ttl| now.checked_add_signed(ttl))
      .filter(|at| at.year() <= 9999)
      .unwrap_or_else(|| now + TimeDelta::days(36_500));

    let key            = key.to_owned();
    let body           = body.to_owned();
    let expires_at_str = encode_dt(expires_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO response_cache (cache_key, body, expires_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (cache_key) DO UPDATE SET
             body       = excluded.body,
             expires_at = excluded.expires_at",
          rusqlite::params![key, body, expires_at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn clear(&self) -> Result<usize> {
    let removed = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM response_cache", [])?))
      .await?;
    tracing::debug!(removed, "response cache cleared");
    Ok(removed)
  }
}
