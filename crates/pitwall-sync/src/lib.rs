//! Upstream → store synchronization.
//!
//! [`service::SyncService`] writes one season (or all of them) from any
//! [`SeasonSource`](pitwall_ergast::SeasonSource) into any
//! [`SeasonStore`](pitwall_core::store::SeasonStore). [`job::run_update`] is
//! the scheduled entry point that picks which seasons to refresh and then
//! invalidates the response cache.

pub mod error;
pub mod job;
pub mod service;

pub use error::{Error, Result};
pub use job::{UpdateReport, run_update};
pub use service::{SeasonSummary, SyncService};

#[cfg(test)]
mod testutils;
