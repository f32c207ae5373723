//! Error type for `pitwall-sync`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("upstream error: {0}")]
  Upstream(#[from] pitwall_ergast::Error),

  #[error("mapping error: {0}")]
  Map(#[from] pitwall_core::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("cache error: {0}")]
  Cache(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
