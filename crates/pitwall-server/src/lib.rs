//! The `pitwall` binary's building blocks: configuration, the daily
//! scheduler and one entry point per subcommand.

pub mod config;
pub mod schedule;

use std::sync::Arc;

use anyhow::Context as _;
use pitwall_api::ApiState;
use pitwall_core::store::SeasonStore;
use pitwall_ergast::ErgastClient;
use pitwall_store_sqlite::SqliteStore;
use pitwall_sync::{SyncService, UpdateReport, run_update};
use tokio::{net::TcpListener, signal};

pub use config::ServerConfig;

type Service = SyncService<ErgastClient, SqliteStore>;

async fn open_store(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
  let path = config.store_path();
  SqliteStore::open(&path)
    .await
    .with_context(|| format!("failed to open store at {path:?}"))
}

fn sync_service(config: &ServerConfig, store: SqliteStore) -> anyhow::Result<Service> {
  let client = ErgastClient::new(config.ergast_base_url.clone())
    .context("failed to build upstream client")?
    .with_policy(config.retry_policy());
  Ok(SyncService::new(client, store))
}

/// `pitwall serve`: the HTTP API, plus the daily update when enabled.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
  let store = open_store(&config).await?;

  if config.schedule_updates {
    let at = config.update_time()?;
    let service = Arc::new(sync_service(&config, store.clone())?);
    tokio::spawn(schedule::run_daily(at, move || {
      let service = service.clone();
      async move {
        if let Err(err) = run_update(&*service, service.store()).await {
          tracing::error!(error = %err, "scheduled season update failed");
        }
      }
    }));
  } else {
    tracing::info!("scheduled updates disabled");
  }

  let state = ApiState::new(Arc::new(store), config.api_config()?);
  let app = pitwall_api::app(state);
  let address = config.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server shut down");
  Ok(())
}

/// `pitwall update`: one run of the update job.
pub async fn update(config: ServerConfig) -> anyhow::Result<Option<UpdateReport>> {
  let store = open_store(&config).await?;
  let service = sync_service(&config, store)?;
  run_update(&service, service.store())
    .await
    .context("season update failed")
}

/// `pitwall seed`: write every upstream season.
pub async fn seed(config: ServerConfig) -> anyhow::Result<()> {
  let store = open_store(&config).await?;
  let service = sync_service(&config, store)?;
  service.put_seasons().await.context("seeding failed")?;
  tracing::info!("seeding completed");
  Ok(())
}

/// `pitwall seed-check`: whether any season is stored. An unreadable store
/// counts as unseeded.
pub async fn seed_check(config: ServerConfig) -> bool {
  let store = match open_store(&config).await {
    Ok(store) => store,
    Err(err) => {
      tracing::error!(error = ?err, "seed check failed");
      return false;
    }
  };
  match store.count_seasons().await {
    Ok(count) => {
      tracing::info!(count, "stored seasons");
      count > 0
    }
    Err(err) => {
      tracing::error!(error = %err, "seed check failed");
      false
    }
  }
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(err) = signal::ctrl_c().await {
      tracing::error!(error = %err, "failed to listen for ctrl-c");
      std::future::pending::<()>().await;
    }
    tracing::info!("received ctrl-c, shutting down");
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
        tracing::info!("received terminate signal, shutting down");
      }
      Err(err) => {
        tracing::error!(error = %err, "failed to install terminate handler");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
}
