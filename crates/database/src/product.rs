//! Product catalog reads.
//!
//! Catalog management lives outside this service; subscriptions only resolve
//! products for price snapshots and list enrichment, and the seed inserts
//! the demo catalog.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Product;

/// Fields for a new product row.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub category: String,
    pub price: String,
    pub unit: String,
    pub stock: i64,
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// Create a new product.
pub async fn create_product(pool: &SqlitePool, product: &NewProduct) -> Result<Product> {
    let result = sqlx::query(
        r#"
        INSERT INTO products (name, sku, description, category, price, unit, stock, image_url, is_active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&product.name)
    .bind(&product.sku)
    .bind(&product.description)
    .bind(&product.category)
    .bind(&product.price)
    .bind(&product.unit)
    .bind(product.stock)
    .bind(&product.image_url)
    .bind(product.is_active)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Product",
                    id: product.sku.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    get_product(pool, result.last_insert_rowid()).await
}

/// Get a product by ID.
pub async fn get_product(pool: &SqlitePool, id: i64) -> Result<Product> {
    sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, sku, description, category, price, unit, stock, image_url, is_active
        FROM products
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Product",
        id: id.to_string(),
    })
}

/// Get the products matching any of the given IDs. Missing IDs are simply
/// absent from the result.
pub async fn get_products_by_ids(pool: &SqlitePool, ids: &[i64]) -> Result<Vec<Product>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT id, name, sku, description, category, price, unit, stock, image_url, is_active \
         FROM products WHERE id IN ({placeholders})"
    );

    let mut query = sqlx::query_as::<_, Product>(&sql);
    for id in ids {
        query = query.bind(id);
    }

    Ok(query.fetch_all(pool).await?)
}

/// List all products.
pub async fn list_products(pool: &SqlitePool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, sku, description, category, price, unit, stock, image_url, is_active
        FROM products
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::test_support::test_db;

    pub(crate) fn milk(sku: &str, price: &str) -> NewProduct {
        NewProduct {
            name: "Full Cream Milk".to_string(),
            sku: sku.to_string(),
            description: None,
            category: "MILK".to_string(),
            price: price.to_string(),
            unit: "L".to_string(),
            stock: 100,
            image_url: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_product_create_and_get() {
        let db = test_db().await;

        let created = create_product(db.pool(), &milk("MILK-FC-001", "60.00"))
            .await
            .unwrap();
        assert_eq!(created.price, "60.00");

        let fetched = get_product(db.pool(), created.id).await.unwrap();
        assert_eq!(fetched, created);

        let missing = get_product(db.pool(), created.id + 99).await;
        assert!(matches!(missing, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_sku_rejected() {
        let db = test_db().await;

        create_product(db.pool(), &milk("MILK-FC-001", "60.00"))
            .await
            .unwrap();
        let result = create_product(db.pool(), &milk("MILK-FC-001", "55.00")).await;
        assert!(matches!(result, Err(DatabaseError::AlreadyExists { .. })));
    }
}
