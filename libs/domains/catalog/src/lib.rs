//! Catalog Domain
//!
//! Versioned product catalog: one canonical entity, three concurrently
//! supported API versions with distinct wire shapes and feature-gating
//! policies.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← versioned HTTP endpoints, gating, 405/404 policy
//! └──────┬──────┘
//!        │            ┌────────────┐   ┌─────────────┐
//!        ├───────────▶│ Projection │   │ FeatureGate │
//!        │            └────────────┘   └─────────────┘
//! ┌──────▼──────┐       pure shape       per-caller
//! │   Service   │       mapping          flag policy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← keyed record table (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product entity, create/patch DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     CatalogService, InMemoryProductRepository, RolloutConfig, RolloutFeatureGate, handlers,
//! };
//! use std::sync::Arc;
//!
//! let repository = InMemoryProductRepository::new();
//! let service = CatalogService::new(repository);
//! let gate = Arc::new(RolloutFeatureGate::new(RolloutConfig::default()));
//!
//! // Axum router serving /v1, /v2 and /v3 product routes
//! let router = handlers::router(service, gate);
//! ```

pub mod error;
pub mod features;
pub mod handlers;
pub mod models;
pub mod projection;
pub mod repository;
pub mod seed;
pub mod service;
pub mod version;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use features::{
    FeatureFlag, FeatureGate, FlagSettings, RolloutConfig, RolloutFeatureGate, TargetingContext,
};
pub use models::{CreateProduct, Product, ProductPatch};
pub use projection::{VersionedProduct, project, project_analytics, project_many};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use seed::seed_catalog;
pub use service::CatalogService;
pub use version::ApiVersion;
