//! Database models.
//!
//! All wire-visible structs serialize with camelCase field names, matching
//! the JSON contract of the storefront API. Decimal amounts (prices,
//! quantities, balances) are kept as strings end to end.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user. Role decides what the authorization gate allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// One of "customer", "vendor", "delivery", "admin".
    pub role: String,
    pub phone: Option<String>,
    /// Decimal-as-string, e.g. "500.00".
    pub wallet_balance: String,
    pub created_at: String,
}

/// A sellable catalog item. Read-only from this subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub category: String,
    /// Decimal-as-string, e.g. "60.00".
    pub price: String,
    pub unit: String,
    pub stock: i64,
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// A recurring-delivery subscription.
///
/// `price_per_l` is snapshotted from the product at creation time and never
/// recalculated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i64,
    pub user_id: String,
    pub product_id: i64,
    /// Decimal-as-string liters per delivery, e.g. "2.5". Always > 0.
    pub quantity: String,
    pub frequency: String,
    pub delivery_time: String,
    pub start_date: String,
    pub status: String,
    pub is_active: bool,
    pub is_paused: bool,
    pub price_per_l: String,
    pub next_delivery_date: Option<String>,
    pub created_at: String,
}

/// One scheduled delivery occurrence for a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDelivery {
    pub id: i64,
    pub subscription_id: i64,
    /// Date-only, YYYY-MM-DD.
    pub delivery_date: String,
    pub quantity: String,
    pub created_at: String,
}

/// A visitor message from the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    /// "new" or "read".
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A session issued by the external auth layer.
///
/// `role_hint` caches the result of a successful admin check so later
/// requests on the same session skip the user lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub role_hint: Option<String>,
    pub created_at: String,
}

/// About Us page content (singleton row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AboutSettings {
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub mission: Option<String>,
    pub vision: Option<String>,
    /// JSON-encoded list of value cards.
    pub values: Option<String>,
    pub is_active: bool,
    pub updated_at: String,
}

/// Contact page content (singleton row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactSettings {
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub business_hours: Option<String>,
    /// JSON-encoded map of social profile URLs.
    pub social_links: Option<String>,
    pub map_embed_url: Option<String>,
    pub is_active: bool,
    pub updated_at: String,
}

/// Terms of Service / Privacy Policy content (singleton rows, shared shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PolicySettings {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    /// JSON-encoded list of titled sections.
    pub sections: Option<String>,
    pub is_active: bool,
    pub updated_at: String,
}

/// The closed set of subscription statuses.
///
/// The PATCH boundary parses into this enum, so an unrecognized status never
/// reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
}

impl SubscriptionStatus {
    /// The stored/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::Paused => "PAUSED",
            SubscriptionStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(SubscriptionStatus::Active),
            "PAUSED" => Ok(SubscriptionStatus::Paused),
            "CANCELLED" => Ok(SubscriptionStatus::Cancelled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized subscription status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown subscription status: {0}")]
pub struct UnknownStatus(pub String);
