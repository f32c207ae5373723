//! Resilient JSON GET with exponential backoff.
//!
//! Only rate limiting and gateway failures (`429`, `502`, `503`, `504`) are
//! retried. Everything else, including connection errors and undecodable
//! bodies, is returned on the first occurrence.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Statuses worth another attempt.
pub const RETRYABLE_STATUSES: [u16; 4] = [429, 502, 503, 504];

pub const DEFAULT_MAX_RETRIES: u32 = 10;
pub const BASE_DELAY: Duration = Duration::from_secs(1);
pub const MAX_DELAY: Duration = Duration::from_secs(30);

pub fn is_retryable_status(status: u16) -> bool { RETRYABLE_STATUSES.contains(&status) }

// ─── Policy ──────────────────────────────────────────────────────────────────

/// How many times and how patiently [`persistent_get`] retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  /// Retries after the first attempt; `N` allows `N + 1` requests in total.
  pub max_retries: u32,
  pub base_delay:  Duration,
  /// Upper bound on any single wait, jitter included.
  pub max_delay:   Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_retries: DEFAULT_MAX_RETRIES,
      base_delay:  BASE_DELAY,
      max_delay:   MAX_DELAY,
    }
  }
}

impl RetryPolicy {
  pub fn with_max_retries(self, max_retries: u32) -> Self { Self { max_retries, ..self } }

  /// The wait before retry number `attempt` (1-based).
  ///
  /// The nominal delay is `base_delay * 2^(attempt - 1)` capped at
  /// `max_delay`; `jitter` in `[0, 1)` adds up to half of it on top, and the
  /// sum is capped again.
  pub fn backoff(&self, attempt: u32, jitter: f64) -> Duration {
    let factor = 1u32
      .checked_shl(attempt.saturating_sub(1))
      .unwrap_or(u32::MAX);
    let delay = self.base_delay.saturating_mul(factor).min(self.max_delay);
    let jitter = delay.mul_f64(0.5 * jitter.clamp(0.0, 1.0));
    delay.saturating_add(jitter).min(self.max_delay)
  }
}

// ─── Request options ─────────────────────────────────────────────────────────

/// Extra request shaping applied on every attempt.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
  pub query:   Vec<(String, String)>,
  pub headers: Vec<(String, String)>,
}

// ─── GET ─────────────────────────────────────────────────────────────────────

/// GET `url` and decode the JSON body, retrying transient upstream failures.
///
/// Makes at most `policy.max_retries + 1` requests. When retries run out the
/// error from the last attempt is returned.
pub async fn persistent_get<T>(
  client: &reqwest::Client,
  url: &str,
  options: &RequestOptions,
  policy: &RetryPolicy,
) -> Result<T>
where
  T: DeserializeOwned,
{
  let mut attempt: u32 = 0;

  loop {
    let err = match get_once(client, url, options).await {
      Ok(value) => return Ok(value),
      Err(err) => err,
    };

    let Some(status) = err.status().filter(|s| is_retryable_status(*s)) else {
      tracing::error!(url, error = %err, "upstream request failed");
      return Err(err);
    };

    attempt += 1;
    if attempt > policy.max_retries {
      tracing::error!(
        url,
        status,
        retries = policy.max_retries,
        "upstream request gave up after exhausting retries"
      );
      return Err(err);
    }

    let wait = policy.backoff(attempt, rand::random::<f64>());
    tracing::warn!(
      url,
      status,
      attempt,
      wait_ms = wait.as_millis() as u64,
      "upstream request failed, retrying"
    );
    tokio::time::sleep(wait).await;
  }
}

async fn get_once<T>(client: &reqwest::Client, url: &str, options: &RequestOptions) -> Result<T>
where
  T: DeserializeOwned,
{
  let mut request = client.get(url);
  if !options.query.is_empty() {
    request = request.query(&options.query);
  }
  for (name, value) in &options.headers {
    request = request.header(name.as_str(), value.as_str());
  }

  let response = request.send().await?;
  let status = response.status();
  if !status.is_success() {
    return Err(Error::Status {
      url:    url.to_owned(),
      status: status.as_u16(),
    });
  }

  let body = response.bytes().await?;
  serde_json::from_slice(&body).map_err(|source| Error::Decode {
    url: url.to_owned(),
    source,
  })
}
