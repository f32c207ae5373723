//! SQL schema for the Pitwall SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS drivers (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    driver_id   TEXT NOT NULL UNIQUE,   -- upstream external identifier
    given_name  TEXT NOT NULL,
    family_name TEXT NOT NULL
);

-- champion_id is only NULL if a writer bypasses upsert_season.
CREATE TABLE IF NOT EXISTS seasons (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    year        INTEGER NOT NULL UNIQUE,
    url         TEXT NOT NULL,
    champion_id INTEGER REFERENCES drivers(id)
);

CREATE TABLE IF NOT EXISTS races (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    season_id  INTEGER NOT NULL REFERENCES seasons(id),
    race_name  TEXT NOT NULL,
    date       TEXT NOT NULL,           -- RFC 3339 UTC
    UNIQUE (race_name, season_id)
);

-- One result per race: only the winner is tracked.
CREATE TABLE IF NOT EXISTS results (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    race_id    INTEGER NOT NULL UNIQUE REFERENCES races(id),
    winner_id  INTEGER NOT NULL REFERENCES drivers(id),
    position   INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS response_cache (
    cache_key  TEXT PRIMARY KEY,
    body       TEXT NOT NULL,
    expires_at TEXT NOT NULL            -- RFC 3339 UTC, fixed width
);

CREATE INDEX IF NOT EXISTS races_season_idx   ON races(season_id);
CREATE INDEX IF NOT EXISTS results_winner_idx ON results(winner_id);

PRAGMA user_version = 1;
";
