//! Subscription registry CRUD and list enrichment.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Product, Subscription, SubscriptionStatus, User};
use crate::{product, user};

/// Fields for a new subscription row.
///
/// `price_per_l` must already hold the product-price snapshot; the registry
/// never recomputes it.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub user_id: String,
    pub product_id: i64,
    pub quantity: String,
    pub frequency: String,
    pub delivery_time: String,
    pub start_date: String,
    pub price_per_l: String,
    pub next_delivery_date: String,
}

/// A subscription enriched with its owning customer and referenced product.
///
/// Enrichment is display-only: a dangling reference serializes as a null
/// companion rather than failing the listing.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionWithDetails {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub customer: Option<User>,
    pub product: Option<Product>,
}

/// Create a subscription. Starts ACTIVE, not paused.
pub async fn create_subscription(pool: &SqlitePool, new: &NewSubscription) -> Result<Subscription> {
    let result = sqlx::query(
        r#"
        INSERT INTO subscriptions
            (user_id, product_id, quantity, frequency, delivery_time, start_date,
             status, is_active, is_paused, price_per_l, next_delivery_date)
        VALUES (?, ?, ?, ?, ?, ?, 'ACTIVE', 1, 0, ?, ?)
        "#,
    )
    .bind(&new.user_id)
    .bind(new.product_id)
    .bind(&new.quantity)
    .bind(&new.frequency)
    .bind(&new.delivery_time)
    .bind(&new.start_date)
    .bind(&new.price_per_l)
    .bind(&new.next_delivery_date)
    .execute(pool)
    .await?;

    get_subscription(pool, result.last_insert_rowid()).await
}

/// Get a subscription by ID.
pub async fn get_subscription(pool: &SqlitePool, id: i64) -> Result<Subscription> {
    sqlx::query_as::<_, Subscription>(
        r#"
        SELECT id, user_id, product_id, quantity, frequency, delivery_time, start_date,
               status, is_active, is_paused, price_per_l, next_delivery_date, created_at
        FROM subscriptions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Subscription",
        id: id.to_string(),
    })
}

/// List all subscriptions.
pub async fn list_subscriptions(pool: &SqlitePool) -> Result<Vec<Subscription>> {
    let subscriptions = sqlx::query_as::<_, Subscription>(
        r#"
        SELECT id, user_id, product_id, quantity, frequency, delivery_time, start_date,
               status, is_active, is_paused, price_per_l, next_delivery_date, created_at
        FROM subscriptions
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(subscriptions)
}

/// List all subscriptions with their customer and product joined in.
///
/// Companions are resolved with two batched lookups keyed by id, so the cost
/// stays at three statements regardless of list size. A deleted user or
/// product leaves that companion `None`.
pub async fn list_with_details(pool: &SqlitePool) -> Result<Vec<SubscriptionWithDetails>> {
    let subscriptions = list_subscriptions(pool).await?;

    let mut user_ids: Vec<String> = subscriptions.iter().map(|s| s.user_id.clone()).collect();
    user_ids.sort();
    user_ids.dedup();

    let mut product_ids: Vec<i64> = subscriptions.iter().map(|s| s.product_id).collect();
    product_ids.sort_unstable();
    product_ids.dedup();

    let users: HashMap<String, User> = user::get_users_by_ids(pool, &user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id.clone(), u))
        .collect();
    let products: HashMap<i64, Product> = product::get_products_by_ids(pool, &product_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    Ok(subscriptions
        .into_iter()
        .map(|subscription| {
            let customer = users.get(&subscription.user_id).cloned();
            let product = products.get(&subscription.product_id).cloned();
            SubscriptionWithDetails {
                subscription,
                customer,
                product,
            }
        })
        .collect())
}

/// Set a subscription's status. Returns the updated row.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: SubscriptionStatus,
) -> Result<Subscription> {
    let result = sqlx::query(
        r#"
        UPDATE subscriptions
        SET status = ?
        WHERE id = ?
        "#,
    )
    .bind(status.as_str())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Subscription",
            id: id.to_string(),
        });
    }

    get_subscription(pool, id).await
}

/// Delete a subscription by ID. Returns the removed row.
pub async fn delete_subscription(pool: &SqlitePool, id: i64) -> Result<Subscription> {
    let subscription = get_subscription(pool, id).await?;

    sqlx::query(
        r#"
        DELETE FROM subscriptions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(subscription)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::tests::milk;
    use crate::test_support::test_db;
    use crate::user::NewUser;
    use crate::Database;

    async fn seed_customer(db: &Database, id: &str) {
        let new = NewUser {
            id: id.to_string(),
            email: format!("{id}@creamline.test"),
            first_name: "Priya".to_string(),
            last_name: "Patel".to_string(),
            role: "customer".to_string(),
            phone: None,
            wallet_balance: "500.00".to_string(),
        };
        user::create_user(db.pool(), &new).await.unwrap();
    }

    fn new_subscription(user_id: &str, product_id: i64, price: &str) -> NewSubscription {
        NewSubscription {
            user_id: user_id.to_string(),
            product_id,
            quantity: "2.5".to_string(),
            frequency: "daily".to_string(),
            delivery_time: "7-8 AM".to_string(),
            start_date: "2026-01-01".to_string(),
            price_per_l: price.to_string(),
            next_delivery_date: "2026-01-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_snapshots_fields() {
        let db = test_db().await;
        seed_customer(&db, "user-customer-1").await;
        let product = product::create_product(db.pool(), &milk("MILK-FC-001", "60.00"))
            .await
            .unwrap();

        let sub = create_subscription(
            db.pool(),
            &new_subscription("user-customer-1", product.id, &product.price),
        )
        .await
        .unwrap();

        assert_eq!(sub.quantity, "2.5");
        assert_eq!(sub.price_per_l, "60.00");
        assert_eq!(sub.status, "ACTIVE");
        assert!(sub.is_active);
        assert!(!sub.is_paused);
        assert_eq!(sub.next_delivery_date.as_deref(), Some("2026-01-01"));
    }

    #[tokio::test]
    async fn test_update_status_and_missing_id() {
        let db = test_db().await;
        seed_customer(&db, "user-customer-1").await;
        let product = product::create_product(db.pool(), &milk("MILK-FC-001", "60.00"))
            .await
            .unwrap();
        let sub = create_subscription(
            db.pool(),
            &new_subscription("user-customer-1", product.id, &product.price),
        )
        .await
        .unwrap();

        let updated = update_status(db.pool(), sub.id, SubscriptionStatus::Paused)
            .await
            .unwrap();
        assert_eq!(updated.status, "PAUSED");

        let missing = update_status(db.pool(), sub.id + 99, SubscriptionStatus::Paused).await;
        assert!(matches!(missing, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_returns_row_once() {
        let db = test_db().await;
        seed_customer(&db, "user-customer-1").await;
        let product = product::create_product(db.pool(), &milk("MILK-FC-001", "60.00"))
            .await
            .unwrap();
        let sub = create_subscription(
            db.pool(),
            &new_subscription("user-customer-1", product.id, &product.price),
        )
        .await
        .unwrap();

        let deleted = delete_subscription(db.pool(), sub.id).await.unwrap();
        assert_eq!(deleted.id, sub.id);
        assert!(list_subscriptions(db.pool()).await.unwrap().is_empty());

        let again = delete_subscription(db.pool(), sub.id).await;
        assert!(matches!(again, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_enrichment_tolerates_dangling_refs() {
        let db = test_db().await;
        seed_customer(&db, "user-customer-1").await;
        let product = product::create_product(db.pool(), &milk("MILK-FC-001", "60.00"))
            .await
            .unwrap();

        // One healthy row and one pointing at a product that never existed.
        create_subscription(
            db.pool(),
            &new_subscription("user-customer-1", product.id, &product.price),
        )
        .await
        .unwrap();
        create_subscription(
            db.pool(),
            &new_subscription("user-customer-1", product.id + 99, "60.00"),
        )
        .await
        .unwrap();

        let details = list_with_details(db.pool()).await.unwrap();
        assert_eq!(details.len(), 2);
        assert!(details[0].customer.is_some());
        assert!(details[0].product.is_some());
        assert!(details[1].customer.is_some());
        assert!(details[1].product.is_none());
    }
}
