//! Versegap · Gap-Fill Exercise Engine Backend
//!
//! - Generates gap-fill exercises from song lyrics at three difficulty tiers
//! - Validates persisted exercises against the platform invariants
//! - Axum HTTP API for generation, lookup, and quality reporting
//!
//! Important env variables:
//!   PORT               : u16 (default 3000)
//!   TAGGER_URL         : enables the remote tokenizer/POS-tagger if present
//!   TAGGER_API_KEY     : bearer token for the remote tagger (optional)
//!   ENGINE_CONFIG_PATH : path to TOML config (options + song bank + lexicon)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod seeds;
mod lexicon;
mod scoring;
mod tokenize;
mod tagger;
mod extract;
mod select;
mod render;
mod builder;
mod validate;
mod state;
mod batch;
mod protocol;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (song bank, stores, collaborators).
  let state = Arc::new(AppState::new());

  // Generate exercises for the whole bank before serving traffic.
  let summary = batch::run_startup_batch(state.clone()).await;
  state.set_batch_summary(summary).await;

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "versegap_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
