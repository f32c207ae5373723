//! Once-a-day timer for the update job.

use std::future::Future;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

/// The first instant strictly after `now` whose UTC time of day is `at`.
pub fn next_run_after(now: DateTime<Utc>, at: NaiveTime) -> DateTime<Utc> {
  let today = now.date_naive().and_time(at).and_utc();
  if today > now { today } else { today + TimeDelta::days(1) }
}

/// Run `job` every day at `at` UTC, forever.
pub async fn run_daily<F, Fut>(at: NaiveTime, mut job: F)
where
  F: FnMut() -> Fut,
  Fut: Future<Output = ()>,
{
  loop {
    let now = Utc::now();
    let next = next_run_after(now, at);
    tracing::info!(next_run = %next, "scheduled next season update");
    tokio::time::sleep((next - now).to_std().unwrap_or_default()).await;
    job().await;
  }
}
