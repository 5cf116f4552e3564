//! Product Repository
//!
//! The catalog is owned by the POS; this module only reads it, plus the
//! stock-sync side channel that refreshes `system_stock`.

use std::collections::HashMap;

use super::RepoResult;
use shared::models::{Product, ProductWithCategory};
use sqlx::SqlitePool;

const PRODUCT_SELECT: &str = "SELECT id, name, category_id, unit_price, system_stock, is_active, created_at, updated_at FROM product";

const PRODUCT_WITH_CATEGORY_SELECT: &str = "SELECT p.id, p.name, p.category_id, c.name AS category_name, p.unit_price, p.system_stock, p.is_active, p.created_at, p.updated_at FROM product p JOIN category c ON p.category_id = c.id";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<ProductWithCategory>> {
    let sql = format!(
        "{} WHERE p.is_active = 1 ORDER BY c.sort_order, p.name",
        PRODUCT_WITH_CATEGORY_SELECT
    );
    let rows = sqlx::query_as::<_, ProductWithCategory>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ProductWithCategory>> {
    let sql = format!("{} WHERE p.id = ?", PRODUCT_WITH_CATEGORY_SELECT);
    let row = sqlx::query_as::<_, ProductWithCategory>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Plain product rows for engine input, id order. Includes inactive
/// products — count entries may reference products retired after the
/// session was seeded, and their shortfalls still need a valuation.
pub async fn find_catalog(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let sql = format!("{} ORDER BY id", PRODUCT_SELECT);
    let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Stock-sync side channel: overwrite `system_stock` from upstream numbers.
/// Unknown product IDs are ignored. Returns the number of rows touched.
pub async fn update_system_stock(
    pool: &SqlitePool,
    fresh_counts: &HashMap<i64, i64>,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let mut touched = 0u64;
    for (product_id, qty) in fresh_counts {
        let result = sqlx::query(
            "UPDATE product SET system_stock = ?1, updated_at = ?2 WHERE id = ?3 AND system_stock != ?1",
        )
        .bind((*qty).max(0))
        .bind(now)
        .bind(product_id)
        .execute(pool)
        .await?;
        touched += result.rows_affected();
    }
    Ok(touched)
}
