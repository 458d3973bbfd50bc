//! Bootstrap catalog data.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::Product;
use crate::repository::ProductRepository;

/// Seed the demo catalog when the store is empty. Idempotent: a non-empty
/// store is left untouched.
pub async fn seed_catalog<R: ProductRepository>(repository: &R) -> CatalogResult<()> {
    if repository.count().await? > 0 {
        return Ok(());
    }

    let products = seed_products();
    let seeded = products.len();
    for product in products {
        repository.create(product).await?;
    }

    tracing::info!(count = seeded, "Seeded catalog");
    Ok(())
}

fn seed_products() -> Vec<Product> {
    vec![
        product("Product A", Decimal::new(1099, 2), false, 100),
        product("Product B", Decimal::new(1549, 2), true, 200),
    ]
}

fn product(name: &str, price: Decimal, is_discounted: bool, quantity: i32) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        display_name: Some(name.to_string()),
        description: None,
        price,
        currency: Some("USD".to_string()),
        is_discounted,
        discounted_price: None,
        in_stock: true,
        quantity,
        category: None,
        department: None,
        tags: Vec::new(),
        views: 0,
        purchases: 0,
        rating: 0.0,
        reviews_count: 0,
    }
}
