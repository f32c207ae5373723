//! The `ResponseCache` trait: a shared key/value store for serialized API
//! responses.
//!
//! The API reads and fills it; the update job clears it once new data has
//! been written.

use std::{future::Future, time::Duration};

pub trait ResponseCache: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the cached body for `key`, or `None` if absent or expired.
  fn lookup<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Store `body` under `key`, replacing any previous entry.
  fn insert<'a>(
    &'a self,
    key: &'a str,
    body: &'a str,
    ttl: Duration,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Drop every cached entry. Returns the number of entries removed.
  fn clear(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
