//! Server infrastructure: router assembly, liveness endpoint, graceful
//! shutdown.
//!
//! ```ignore
//! let app = create_router(api_routes).merge(health_router(app_info!()));
//! create_app(app, &ServerConfig::from_env()?).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use health::{HealthResponse, health_router};
pub use shutdown::shutdown_signal;
