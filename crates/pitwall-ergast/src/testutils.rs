//! Helpers shared by the in-crate tests.

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;

use crate::fetch::RetryPolicy;

/// Serve `app` on an ephemeral localhost port and return its base URL.
pub async fn serve(app: Router) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  format!("http://{addr}")
}

/// A policy with millisecond-scale waits so retry tests run quickly.
pub fn fast_policy(max_retries: u32) -> RetryPolicy {
  RetryPolicy {
    max_retries,
    base_delay: Duration::from_millis(1),
    max_delay: Duration::from_millis(5),
  }
}
