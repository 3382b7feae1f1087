pub mod get;
pub mod list;

pub use list::ListProductsQuery;

use std::collections::HashMap;

use sqlx::PgPool;

use super::images::images_by_product;
use super::types::{Product, ProductDetail};
use crate::features::brands::Brand;
use crate::features::categories::Category;

/// Attach brand, category and images to each product with one query per relation.
pub async fn embed(pool: &PgPool, products: Vec<Product>) -> Result<Vec<ProductDetail>, sqlx::Error> {
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    let brand_ids: Vec<i64> = products.iter().filter_map(|p| p.brand_id).collect();
    let category_ids: Vec<i64> = products.iter().filter_map(|p| p.category_id).collect();

    let brands: HashMap<i64, Brand> = if brand_ids.is_empty() {
        HashMap::new()
    } else {
        sqlx::query_as::<_, Brand>("SELECT * FROM brands WHERE id = ANY($1)")
            .bind(&brand_ids)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect()
    };

    let categories: HashMap<i64, Category> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ANY($1)")
            .bind(&category_ids)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect()
    };

    let mut images = images_by_product(pool, &product_ids).await?;

    Ok(products
        .into_iter()
        .map(|product| ProductDetail {
            brand: product.brand_id.and_then(|id| brands.get(&id).cloned()),
            category: product.category_id.and_then(|id| categories.get(&id).cloned()),
            images: images.remove(&product.id).unwrap_or_default(),
            product,
        })
        .collect())
}
