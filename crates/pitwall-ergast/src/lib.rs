//! Client for the Ergast-compatible motorsport statistics API.
//!
//! [`fetch::persistent_get`] delivers JSON with retry and backoff,
//! [`client::ErgastClient`] knows the three endpoints Pitwall consumes, and
//! [`mapper::map_season`] flattens one season's payloads into the
//! [`pitwall_core::domain::Season`] the store understands.

#![allow(async_fn_in_trait)]

pub mod client;
pub mod error;
pub mod fetch;
pub mod mapper;
pub mod types;

pub use client::{ErgastClient, SeasonSource};
pub use error::{Error, Result};

#[cfg(test)]
mod testutils;
