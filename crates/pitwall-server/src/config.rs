//! Runtime configuration: an optional TOML file overlaid by `PITWALL_*`
//! environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use axum::http::HeaderValue;
use chrono::NaiveTime;
use pitwall_api::ApiConfig;
use pitwall_ergast::{client::DEFAULT_BASE_URL, fetch::RetryPolicy};
use serde::Deserialize;

const ENV_PREFIX: &str = "PITWALL";

/// Everything the `pitwall` binary reads from configuration. Every field has
/// a default, so an absent file is fine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  /// SQLite database file; a leading `~/` is expanded.
  pub store_path:       PathBuf,
  pub ergast_base_url:  String,
  pub max_retries:      u32,
  pub cache_ttl_secs:   u64,
  /// `*` allows any origin.
  pub cors_origin:      String,
  /// Run the update job daily while serving.
  pub schedule_updates: bool,
  /// Hour of day (UTC) the scheduled update runs at.
  pub update_hour_utc:  u32,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:             "0.0.0.0".into(),
      port:             3000,
      store_path:       PathBuf::from("pitwall.db"),
      ergast_base_url:  DEFAULT_BASE_URL.into(),
      max_retries:      pitwall_ergast::fetch::DEFAULT_MAX_RETRIES,
      cache_ttl_secs:   86_400,
      cors_origin:      "*".into(),
      schedule_updates: true,
      update_hour_utc:  2,
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()
      .context("failed to read config file")?;
    Self::from_settings(settings)
  }

  pub fn from_settings(settings: config::Config) -> anyhow::Result<Self> {
    let config: Self = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    config.update_time()?;
    Ok(config)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }

  pub fn retry_policy(&self) -> RetryPolicy {
    RetryPolicy::default().with_max_retries(self.max_retries)
  }

  pub fn update_time(&self) -> anyhow::Result<NaiveTime> {
    NaiveTime::from_hms_opt(self.update_hour_utc, 0, 0)
      .with_context(|| format!("update_hour_utc must be 0-23 (got {})", self.update_hour_utc))
  }

  pub fn api_config(&self) -> anyhow::Result<ApiConfig> {
    let cors_origin = match self.cors_origin.trim() {
      "*" => None,
      origin => Some(
        HeaderValue::from_str(origin)
          .with_context(|| format!("invalid cors_origin {origin:?}"))?,
      ),
    };
    Ok(ApiConfig {
      cache_ttl: Duration::from_secs(self.cache_ttl_secs),
      cors_origin,
    })
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
