//! Catalog API routes

use axum::Router;
use domain_catalog::{CatalogService, RolloutFeatureGate, handlers, seed_catalog};
use std::sync::Arc;

use crate::state::AppState;

/// Create the catalog router (versioned product routes, no `/api` prefix).
pub fn routes(state: &AppState) -> Router {
    let service = CatalogService::new(state.repository.clone());
    let gate = Arc::new(RolloutFeatureGate::new(state.config.features.clone()));
    handlers::router(service, gate)
}

/// Seed the demo catalog when the store is empty.
pub async fn seed(state: &AppState) -> eyre::Result<()> {
    seed_catalog(&state.repository).await?;
    Ok(())
}
