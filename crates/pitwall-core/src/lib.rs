//! Core types and trait definitions for Pitwall.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! ingestion pipeline, the SQLite backend and the API all meet here.

// Native `async fn` in traits; `Send` bounds are spelled out on the trait
// methods themselves.
#![allow(async_fn_in_trait)]

pub mod cache;
pub mod domain;
pub mod error;
pub mod record;
pub mod store;

pub use error::{Error, Result};
