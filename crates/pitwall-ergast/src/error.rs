//! Error type for `pitwall-ergast`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The upstream answered with a non-success status.
  #[error("upstream returned {status} for {url}")]
  Status { url: String, status: u16 },

  /// Connection, TLS or timeout failure; no status was received.
  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("could not decode payload from {url}: {source}")]
  Decode {
    url:    String,
    #[source]
    source: serde_json::Error,
  },

  #[error("mapping error: {0}")]
  Map(#[from] pitwall_core::Error),
}

impl Error {
  /// The HTTP status the upstream answered with, if any.
  pub fn status(&self) -> Option<u16> {
    match self {
      Error::Status { status, .. } => Some(*status),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
