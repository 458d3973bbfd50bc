//! Version-aware response projection.
//!
//! Pure mapping from the canonical [`Product`] to the wire shape of each API
//! version: no I/O, no side effects, deterministic. All fallback rules live
//! here — "empty or absent" defaulting applies to optional string fields
//! only; numbers and booleans pass through as stored, including zero and
//! false.
//!
//! Several v3 collections (`priceHistory`, `inventoryHistory`, `variants`,
//! `topReviews`, `subCategories`) are documented stubs: structurally present
//! for wire compatibility, always empty. No subsystem behind them exists.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::Product;
use crate::version::ApiVersion;

const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_CATEGORY: &str = "General";
const DEFAULT_DEPARTMENT: &str = "Default";
const WAREHOUSE_LOCATION: &str = "Primary Warehouse";
const WAREHOUSE_CODE: &str = "WH-001";

/// v1 response: flat, verbatim passthrough, no defaulting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductV1 {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
}

/// v2 response: nested product/inventory blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductV2 {
    pub id: Uuid,
    pub product: ProductInfoV2,
    pub inventory: InventoryV2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfoV2 {
    pub name: String,
    pub display_name: String,
    pub pricing: PricingV2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingV2 {
    pub amount: Decimal,
    pub currency: String,
    pub discounted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryV2 {
    pub in_stock: bool,
    pub quantity: i32,
}

/// v3 response: v2 plus descriptions, tags, analytics, category data and the
/// stub collections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductV3 {
    pub id: Uuid,
    pub product: ProductInfoV3,
    pub inventory: InventoryV3,
    pub analytics: AnalyticsV3,
    pub category: CategoryV3,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfoV3 {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub pricing: PricingV3,
    pub variants: Vec<VariantV3>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingV3 {
    pub amount: Decimal,
    pub currency: String,
    pub discounted: bool,
    pub discounted_amount: Option<Decimal>,
    pub price_history: Vec<PricePointV3>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryV3 {
    pub in_stock: bool,
    pub quantity: i32,
    pub reserved_quantity: i32,
    pub warehouse: WarehouseV3,
    pub inventory_history: Vec<InventoryEventV3>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseV3 {
    pub location: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsV3 {
    pub views: i64,
    pub purchases: i64,
    pub rating: f64,
    pub reviews_count: i32,
    pub top_reviews: Vec<ReviewV3>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryV3 {
    pub primary_category: String,
    pub sub_categories: Vec<String>,
    pub department: String,
}

/// Element type of the `variants` stub collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantV3 {
    pub id: Uuid,
    pub name: String,
}

/// Element type of the `priceHistory` stub collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePointV3 {
    pub amount: Decimal,
    pub currency: String,
}

/// Element type of the `inventoryHistory` stub collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEventV3 {
    pub quantity: i32,
    pub reason: String,
}

/// Element type of the `topReviews` stub collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewV3 {
    pub author: String,
    pub rating: f64,
    pub comment: String,
}

/// A product shaped for one API version.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VersionedProduct {
    V1(ProductV1),
    V2(ProductV2),
    V3(ProductV3),
}

/// Project one product into the requested version's wire shape.
pub fn project(product: &Product, version: ApiVersion) -> VersionedProduct {
    match version {
        ApiVersion::V1 => VersionedProduct::V1(project_v1(product)),
        ApiVersion::V2 => VersionedProduct::V2(project_v2(product)),
        ApiVersion::V3 => VersionedProduct::V3(project_v3(product)),
    }
}

/// Project a whole listing. Shapes are uniform per response: one version in,
/// one shape out.
pub fn project_many(products: &[Product], version: ApiVersion) -> Vec<VersionedProduct> {
    products.iter().map(|p| project(p, version)).collect()
}

/// The standalone analytics sub-shape served by the v3 analytics endpoint.
pub fn project_analytics(product: &Product) -> AnalyticsV3 {
    AnalyticsV3 {
        views: product.views,
        purchases: product.purchases,
        rating: product.rating,
        reviews_count: product.reviews_count,
        top_reviews: Vec::new(),
    }
}

fn project_v1(product: &Product) -> ProductV1 {
    ProductV1 {
        id: product.id,
        name: product.name.clone(),
        price: product.price,
    }
}

fn project_v2(product: &Product) -> ProductV2 {
    ProductV2 {
        id: product.id,
        product: ProductInfoV2 {
            name: product.name.clone(),
            display_name: or_fallback(&product.display_name, &product.name),
            pricing: PricingV2 {
                amount: product.price,
                currency: or_fallback(&product.currency, DEFAULT_CURRENCY),
                discounted: product.is_discounted,
            },
        },
        inventory: InventoryV2 {
            in_stock: product.in_stock,
            quantity: product.quantity,
        },
    }
}

fn project_v3(product: &Product) -> ProductV3 {
    ProductV3 {
        id: product.id,
        product: ProductInfoV3 {
            name: product.name.clone(),
            display_name: or_fallback(&product.display_name, &product.name),
            description: or_fallback(&product.description, ""),
            tags: product.tags.clone(),
            pricing: PricingV3 {
                amount: product.price,
                currency: or_fallback(&product.currency, DEFAULT_CURRENCY),
                discounted: product.is_discounted,
                discounted_amount: product.discounted_price,
                price_history: Vec::new(),
            },
            variants: Vec::new(),
        },
        inventory: InventoryV3 {
            in_stock: product.in_stock,
            quantity: product.quantity,
            reserved_quantity: 0,
            warehouse: WarehouseV3 {
                location: WAREHOUSE_LOCATION.to_string(),
                code: WAREHOUSE_CODE.to_string(),
            },
            inventory_history: Vec::new(),
        },
        analytics: project_analytics(product),
        category: CategoryV3 {
            primary_category: or_fallback(&product.category, DEFAULT_CATEGORY),
            sub_categories: Vec::new(),
            department: or_fallback(&product.department, DEFAULT_DEPARTMENT),
        },
    }
}

/// "Empty or absent" defaulting for optional string fields.
fn or_fallback(value: &Option<String>, fallback: &str) -> String {
    match value.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => fallback.to_string(),
    }
}
