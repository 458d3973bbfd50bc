//! Application state management

use domain_catalog::InMemoryProductRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub repository: InMemoryProductRepository,
}
