//! Catalog API - versioned products REST server

use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_catalog::InMemoryProductRepository;
use tracing::info;

mod api;
mod config;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    // Initialize the application state
    let state = AppState {
        config: config.clone(),
        repository: InMemoryProductRepository::new(),
    };

    // Populate the demo catalog on first boot
    api::seed(&state).await?;

    // Build the router: versioned product routes under /api, liveness at /health
    let api_routes = api::routes(&state);
    let router = create_router(api_routes);
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting Catalog API on port {} ({:?})",
        state.config.server.port, state.config.environment
    );

    create_app(app, &state.config.server).await?;

    info!("Catalog API shutdown complete");
    Ok(())
}
