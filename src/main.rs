//! Prepwise · Interview Preparation Backend
//!
//! - Axum HTTP API over an in-memory store seeded with a question bank
//! - Scripted virtual interviewer with heuristic answer scoring
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT            : u16 (default 3000)
//!   APP_CONFIG_PATH : path to TOML config (extra questions + interview script)
//!   LOG_LEVEL       : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use prepwise_backend::routes::build_router;
use prepwise_backend::state::AppState;
use prepwise_backend::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (in-memory store, script, evaluator).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "prepwise_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
