//! HTTP handlers for the versioned products API.
//!
//! One route tree serves all three versions; the `{version}` segment decides
//! the response shape and which operations are legal. Requests that pair an
//! operation with a version that never offered it get 405, an unresolvable
//! version token gets 400, and a gated-off v1/v2 read gets the same 404 a
//! missing record would.

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{UuidPath, ValidatedJson};
use std::sync::Arc;

use crate::error::{CatalogError, CatalogResult};
use crate::features::{FeatureFlag, FeatureGate, TargetingContext};
use crate::models::{CreateProduct, ProductPatch};
use crate::projection::{self, AnalyticsV3, VersionedProduct};
use crate::repository::ProductRepository;
use crate::service::CatalogService;
use crate::version::{ApiVersion, ResolvedVersion, version_headers};

/// Per-router dependencies. The gate is injected here rather than consulted
/// through any global, so tests can swap in fake evaluators.
pub struct CatalogApi<R: ProductRepository> {
    service: CatalogService<R>,
    gate: Arc<dyn FeatureGate>,
}

/// Create the products router with all versioned endpoints.
///
/// The unversioned `/products` aliases resolve to the implicit default
/// version (v1), which only serves reads.
pub fn router<R: ProductRepository + 'static>(
    service: CatalogService<R>,
    gate: Arc<dyn FeatureGate>,
) -> Router {
    let state = Arc::new(CatalogApi { service, gate });

    Router::new()
        .route("/products", get(list_products::<R>))
        .route("/products/{id}", get(get_product::<R>))
        .route(
            "/{version}/products",
            get(list_products::<R>).post(create_product::<R>),
        )
        .route(
            "/{version}/products/{id}",
            get(get_product::<R>)
                .put(update_product::<R>)
                .delete(delete_product::<R>),
        )
        .route(
            "/{version}/products/{id}/analytics",
            get(get_product_analytics::<R>),
        )
        .route("/{version}/products/{id}/view", post(record_view::<R>))
        .layer(middleware::from_fn(version_headers))
        .with_state(state)
}

/// List products, shaped for the requested version. Listing is not gated.
async fn list_products<R: ProductRepository>(
    State(api): State<Arc<CatalogApi<R>>>,
    ResolvedVersion(version): ResolvedVersion,
) -> CatalogResult<Json<Vec<VersionedProduct>>> {
    let products = api.service.list_products().await?;
    Ok(Json(projection::project_many(&products, version)))
}

/// Get one product, shaped for the requested version.
///
/// v1 and v2 consult their feature flag first; a disabled flag (or a failing
/// evaluator — fail closed) reports the same 404 a missing record would, so
/// gating is indistinguishable from absence to the caller.
async fn get_product<R: ProductRepository>(
    State(api): State<Arc<CatalogApi<R>>>,
    ResolvedVersion(version): ResolvedVersion,
    targeting: TargetingContext,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<VersionedProduct>> {
    if let Some(flag) = FeatureFlag::for_version(version) {
        let enabled = api.gate.is_enabled(flag, &targeting).await.unwrap_or(false);
        if !enabled {
            tracing::debug!(%flag, "Feature disabled for caller, reporting not found");
            return Err(CatalogError::NotFound(id));
        }
    }

    let product = api.service.get_product(id).await?;
    tracing::info!(product_id = %id, %version, "Retrieved product");
    Ok(Json(projection::project(&product, version)))
}

/// Create a product. v3 only.
async fn create_product<R: ProductRepository>(
    State(api): State<Arc<CatalogApi<R>>>,
    ResolvedVersion(version): ResolvedVersion,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<impl IntoResponse> {
    require_exactly(ApiVersion::V3, version, "create")?;

    let product = api.service.create_product(input).await?;
    let location = format!("/api/v3/products/{}", product.id);
    let body = projection::project(&product, ApiVersion::V3);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    ))
}

/// Partially update a product. v3 only; absent fields are preserved.
async fn update_product<R: ProductRepository>(
    State(api): State<Arc<CatalogApi<R>>>,
    ResolvedVersion(version): ResolvedVersion,
    UuidPath(id): UuidPath,
    ValidatedJson(patch): ValidatedJson<ProductPatch>,
) -> CatalogResult<StatusCode> {
    require_exactly(ApiVersion::V3, version, "update")?;

    api.service.update_product(id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product. Available from v2 up.
async fn delete_product<R: ProductRepository>(
    State(api): State<Arc<CatalogApi<R>>>,
    ResolvedVersion(version): ResolvedVersion,
    UuidPath(id): UuidPath,
) -> CatalogResult<StatusCode> {
    require_at_least(ApiVersion::V2, version, "delete")?;

    api.service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The analytics sub-shape on its own. v3 only.
async fn get_product_analytics<R: ProductRepository>(
    State(api): State<Arc<CatalogApi<R>>>,
    ResolvedVersion(version): ResolvedVersion,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<AnalyticsV3>> {
    require_exactly(ApiVersion::V3, version, "analytics")?;

    let product = api.service.get_product(id).await?;
    Ok(Json(projection::project_analytics(&product)))
}

/// Increment the view counter. v3 only, no response body.
async fn record_view<R: ProductRepository>(
    State(api): State<Arc<CatalogApi<R>>>,
    ResolvedVersion(version): ResolvedVersion,
    UuidPath(id): UuidPath,
) -> CatalogResult<StatusCode> {
    require_exactly(ApiVersion::V3, version, "record-view")?;

    api.service.record_view(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn require_exactly(
    required: ApiVersion,
    version: ApiVersion,
    operation: &'static str,
) -> CatalogResult<()> {
    if version != required {
        return Err(CatalogError::OperationNotSupported { operation, version });
    }
    Ok(())
}

fn require_at_least(
    min: ApiVersion,
    version: ApiVersion,
    operation: &'static str,
) -> CatalogResult<()> {
    if version < min {
        return Err(CatalogError::OperationNotSupported { operation, version });
    }
    Ok(())
}
