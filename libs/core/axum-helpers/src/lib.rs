//! Shared axum building blocks for workspace HTTP services.
//!
//! Provides the standard error envelope ([`AppError`] / [`ErrorResponse`]),
//! request extractors with structured rejections, and server bootstrap glue
//! (router assembly, liveness endpoint, graceful shutdown).

pub mod errors;
pub mod extractors;
pub mod server;

pub use errors::{AppError, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson};
pub use server::{create_app, create_router, health_router, shutdown_signal};
