//! Error types for `pitwall-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid season year: {0:?}")]
  InvalidYear(String),

  #[error("invalid race date {value:?}: {reason}")]
  InvalidRaceDate { value: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
