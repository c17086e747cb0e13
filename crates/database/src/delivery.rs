//! Delivery records and the daily requirement aggregation.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::SubscriptionDelivery;

/// Fields for a new delivery record.
#[derive(Debug, Clone)]
pub struct NewDelivery {
    pub subscription_id: i64,
    /// Date-only, YYYY-MM-DD.
    pub delivery_date: String,
    pub quantity: String,
}

/// Total volume needed for one calendar date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRequirement {
    pub date: String,
    pub total_required: f64,
    pub delivery_count: usize,
    pub deliveries: Vec<SubscriptionDelivery>,
}

/// Record a scheduled delivery occurrence.
pub async fn create_delivery(pool: &SqlitePool, new: &NewDelivery) -> Result<SubscriptionDelivery> {
    let result = sqlx::query(
        r#"
        INSERT INTO subscription_deliveries (subscription_id, delivery_date, quantity)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(new.subscription_id)
    .bind(&new.delivery_date)
    .bind(&new.quantity)
    .execute(pool)
    .await?;

    let delivery = sqlx::query_as::<_, SubscriptionDelivery>(
        r#"
        SELECT id, subscription_id, delivery_date, quantity, created_at
        FROM subscription_deliveries
        WHERE id = ?
        "#,
    )
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await?;

    Ok(delivery)
}

/// All delivery records scheduled for one date.
pub async fn list_deliveries_for_date(
    pool: &SqlitePool,
    date: &str,
) -> Result<Vec<SubscriptionDelivery>> {
    let deliveries = sqlx::query_as::<_, SubscriptionDelivery>(
        r#"
        SELECT id, subscription_id, delivery_date, quantity, created_at
        FROM subscription_deliveries
        WHERE delivery_date = ?
        ORDER BY id
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(deliveries)
}

/// Compute the total volume required on the given date.
///
/// Sums the quantity of every matching delivery record. Zero matching rows
/// is a valid outcome with a total of 0. A quantity that fails to parse
/// contributes 0 and is logged, so one bad row cannot poison the aggregate.
pub async fn daily_requirement(pool: &SqlitePool, date: &str) -> Result<DailyRequirement> {
    let deliveries = list_deliveries_for_date(pool, date).await?;

    let mut total_required = 0.0;
    for delivery in &deliveries {
        match delivery.quantity.parse::<f64>() {
            Ok(quantity) => total_required += quantity,
            Err(_) => tracing::warn!(
                delivery_id = delivery.id,
                quantity = %delivery.quantity,
                "Unparseable delivery quantity, counted as 0"
            ),
        }
    }

    Ok(DailyRequirement {
        date: date.to_string(),
        delivery_count: deliveries.len(),
        total_required,
        deliveries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    fn delivery(date: &str, quantity: &str) -> NewDelivery {
        NewDelivery {
            subscription_id: 1,
            delivery_date: date.to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[tokio::test]
    async fn test_requirement_sums_matching_date_only() {
        let db = test_db().await;
        create_delivery(db.pool(), &delivery("2026-08-28", "2.5"))
            .await
            .unwrap();
        create_delivery(db.pool(), &delivery("2026-08-28", "1"))
            .await
            .unwrap();
        create_delivery(db.pool(), &delivery("2026-08-29", "4"))
            .await
            .unwrap();

        let report = daily_requirement(db.pool(), "2026-08-28").await.unwrap();
        assert_eq!(report.date, "2026-08-28");
        assert_eq!(report.delivery_count, 2);
        assert_eq!(report.total_required, 3.5);
        assert_eq!(report.deliveries.len(), 2);
    }

    #[tokio::test]
    async fn test_requirement_empty_day_is_zero() {
        let db = test_db().await;

        let report = daily_requirement(db.pool(), "2026-08-28").await.unwrap();
        assert_eq!(report.total_required, 0.0);
        assert_eq!(report.delivery_count, 0);
        assert!(report.deliveries.is_empty());
    }

    #[tokio::test]
    async fn test_requirement_bad_quantity_counts_as_zero() {
        let db = test_db().await;
        create_delivery(db.pool(), &delivery("2026-08-28", "2"))
            .await
            .unwrap();
        create_delivery(db.pool(), &delivery("2026-08-28", "two liters"))
            .await
            .unwrap();

        let report = daily_requirement(db.pool(), "2026-08-28").await.unwrap();
        // The malformed row still appears in the list but adds nothing.
        assert_eq!(report.delivery_count, 2);
        assert_eq!(report.total_required, 2.0);
    }
}
