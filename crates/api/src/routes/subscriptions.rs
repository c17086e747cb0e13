//! Admin subscription routes: registry CRUD and the daily requirement
//! report.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use database::delivery::{self, DailyRequirement};
use database::subscription::{self, NewSubscription, SubscriptionWithDetails};
use database::{product, Subscription, SubscriptionStatus};

use crate::auth::AdminIdentity;
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Create-subscription body.
///
/// `productId` and `quantity` accept either JSON numbers or numeric strings;
/// clients send both shapes. Quantities are stored in canonical numeric form,
/// so `"2.50"` is persisted as `"2.5"`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub user_id: Option<String>,
    pub product_id: Option<Value>,
    pub quantity: Option<Value>,
    pub frequency: Option<String>,
    pub delivery_time: Option<String>,
    pub start_date: Option<String>,
}

/// Status-patch body.
#[derive(Deserialize)]
pub struct StatusBody {
    pub status: Option<String>,
}

/// Response for a created subscription.
#[derive(Serialize)]
pub struct CreateResponse {
    pub message: String,
    pub subscription: Subscription,
}

/// Response for a deleted subscription.
#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub subscription: Subscription,
}

/// Admin: list all subscriptions with customer and product details.
pub async fn list(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<SubscriptionWithDetails>>> {
    let subscriptions = subscription::list_with_details(state.db.pool()).await?;
    Ok(Json(subscriptions))
}

/// Admin: total volume needed for today's scheduled deliveries.
pub async fn today_requirement(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<DailyRequirement>> {
    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let report = delivery::daily_requirement(state.db.pool(), &today).await?;
    Ok(Json(report))
}

/// Admin: create a subscription for a customer.
///
/// Snapshots the product's current price into `pricePerL`; later catalog
/// price changes never touch existing subscriptions.
pub async fn create(
    admin: AdminIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateBody>,
) -> Result<(StatusCode, Json<CreateResponse>)> {
    let product_id = body.product_id.as_ref().and_then(parse_id);
    let (user_id, product_id) = match (body.user_id, product_id) {
        (Some(user_id), Some(product_id)) if !user_id.trim().is_empty() => (user_id, product_id),
        _ => {
            return Err(ApiError::Validation(
                "Customer and Product are required".to_string(),
            ))
        }
    };

    // 404s as "Product not found" if the catalog has no such item.
    let product = product::get_product(state.db.pool(), product_id).await?;

    // Unset, unparseable, or non-positive quantities fall back to 1.
    let quantity = body
        .quantity
        .as_ref()
        .and_then(parse_quantity)
        .filter(|q| *q > 0.0)
        .unwrap_or(1.0);
    let start_date = body
        .start_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string());

    let new = NewSubscription {
        user_id,
        product_id,
        quantity: quantity.to_string(),
        frequency: body.frequency.unwrap_or_else(|| "daily".to_string()),
        delivery_time: body.delivery_time.unwrap_or_else(|| "7-8 AM".to_string()),
        start_date: start_date.clone(),
        price_per_l: product.price,
        next_delivery_date: start_date,
    };
    let created = subscription::create_subscription(state.db.pool(), &new).await?;
    tracing::info!(
        admin = %admin.user_id,
        subscription = created.id,
        customer = %created.user_id,
        "Subscription created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            message: "Subscription created".to_string(),
            subscription: created,
        }),
    ))
}

/// Admin: pause/resume/cancel a subscription.
pub async fn update_status(
    admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Subscription>> {
    let raw = body
        .status
        .ok_or_else(|| ApiError::Validation("Status is required".to_string()))?;
    let status: SubscriptionStatus = raw
        .parse()
        .map_err(|_| ApiError::Validation(format!("Invalid subscription status: {raw}")))?;

    let updated = subscription::update_status(state.db.pool(), id, status).await?;
    tracing::info!(admin = %admin.user_id, subscription = id, status = %status, "Subscription status updated");
    Ok(Json(updated))
}

/// Admin: delete a subscription.
pub async fn remove(
    admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    let deleted = subscription::delete_subscription(state.db.pool(), id).await?;
    tracing::info!(admin = %admin.user_id, subscription = id, "Subscription deleted");
    Ok(Json(DeleteResponse {
        message: "Subscription deleted".to_string(),
        subscription: deleted,
    }))
}

/// Parse an id that may arrive as a number or a numeric string.
fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a quantity that may arrive as a number or a numeric string.
/// Unparseable input falls back to the caller's default.
fn parse_quantity(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
