//! Application setup and initialization
//!
//! Startup order: validate configuration, install tracing, build the storage backend,
//! then wire state and routes.

pub mod routes;
pub mod server;
pub mod storage;

use crate::services::{InMemoryTimelineStore, TimelineStore};
use crate::state::AppState;
use anyhow::{Context, Result};
use keepsake_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_json());

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config)?;

    let timeline: Arc<dyn TimelineStore> = Arc::new(InMemoryTimelineStore::new());
    let state = Arc::new(AppState::new(config.clone(), storage, timeline));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
