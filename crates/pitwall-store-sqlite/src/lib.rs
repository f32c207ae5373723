//! SQLite backend for Pitwall.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. One [`SqliteStore`] serves as both the
//! [`SeasonStore`](pitwall_core::store::SeasonStore) and the
//! [`ResponseCache`](pitwall_core::cache::ResponseCache), so separate
//! processes sharing the database file also share the cache.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
