use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Product entity - the canonical record behind every API version.
///
/// Optional strings model "empty or absent means use the documented
/// fallback"; the fallback itself is applied at projection time, never
/// written back into the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, generated at creation, immutable thereafter
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Marketing name; falls back to `name` on the wire when empty/absent
    pub display_name: Option<String>,
    pub description: Option<String>,
    /// Unit price, non-negative
    pub price: Decimal,
    /// ISO currency code; falls back to "USD" on the wire
    pub currency: Option<String>,
    pub is_discounted: bool,
    /// Only meaningful while `is_discounted` is set; not enforced
    pub discounted_price: Option<Decimal>,
    pub in_stock: bool,
    /// Units on hand, non-negative
    pub quantity: i32,
    /// Falls back to "General" on the wire
    pub category: Option<String>,
    /// Falls back to "Default" on the wire
    pub department: Option<String>,
    /// Ordered tag list, stored natively (never as a delimited string)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Incremented by exactly 1 per record-view call
    pub views: i64,
    pub purchases: i64,
    pub rating: f64,
    pub reviews_count: i32,
}

/// DTO for creating a product (v3 create body)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    pub currency: Option<String>,
    #[serde(default)]
    pub is_discounted: bool,
    pub discounted_price: Option<Decimal>,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity: i32,
    pub category: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for partially updating a product (v3 update body).
///
/// Every field is optional; an absent field leaves the stored value
/// untouched. Note that at the JSON layer `null` and "absent" are the same
/// thing, so a patch cannot reset an optional field back to empty.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    pub is_discounted: Option<bool>,
    pub discounted_price: Option<Decimal>,
    pub in_stock: Option<bool>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub category: Option<String>,
    pub department: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Product {
    /// Create a new product from a CreateProduct DTO.
    ///
    /// Counters start at zero; the stored record keeps exactly what the
    /// caller sent, fallbacks are a projection concern.
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            display_name: input.display_name,
            description: input.description,
            price: input.price,
            currency: input.currency,
            is_discounted: input.is_discounted,
            discounted_price: input.discounted_price,
            in_stock: input.in_stock,
            quantity: input.quantity,
            category: input.category,
            department: input.department,
            tags: input.tags,
            views: 0,
            purchases: 0,
            rating: 0.0,
            reviews_count: 0,
        }
    }

    /// Merge a patch onto the record, field by field. Absent patch fields
    /// preserve the stored value.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(display_name) = patch.display_name {
            self.display_name = Some(display_name);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(currency) = patch.currency {
            self.currency = Some(currency);
        }
        if let Some(is_discounted) = patch.is_discounted {
            self.is_discounted = is_discounted;
        }
        if let Some(discounted_price) = patch.discounted_price {
            self.discounted_price = Some(discounted_price);
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(department) = patch.department {
            self.department = Some(department);
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }
}
