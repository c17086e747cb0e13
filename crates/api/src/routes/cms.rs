//! CMS settings routes: About Us, Contact, Terms of Service, Privacy Policy.
//!
//! Each page is a singleton row with a public read (only when active), an
//! admin read, and an admin full-record overwrite. A missing or inactive row
//! reads as `{}`, which clients treat as "nothing to show".

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use database::settings::{self, AboutUpdate, ContactUpdate, PolicyKind, PolicyUpdate};
use database::{AboutSettings, ContactSettings, PolicySettings};

use crate::auth::AdminIdentity;
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Full-record PUT body for the About Us page.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutBody {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub values: Option<String>,
    /// Unset counts as false: the page goes dark until set true again.
    pub is_active: Option<bool>,
}

/// Full-record PUT body for the Contact page.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBody {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub business_hours: Option<String>,
    pub social_links: Option<String>,
    pub map_embed_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Full-record PUT body for the Terms of Service and Privacy Policy pages.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyBody {
    pub title: Option<String>,
    pub content: Option<String>,
    pub sections: Option<String>,
    pub is_active: Option<bool>,
}

/// Serialize a row, or `{}` when there is none to show.
fn row_or_empty<T: Serialize>(row: Option<T>) -> Result<Json<Value>> {
    match row {
        Some(row) => {
            let value =
                serde_json::to_value(row).map_err(|e| ApiError::Internal(e.to_string()))?;
            Ok(Json(value))
        }
        None => Ok(Json(serde_json::json!({}))),
    }
}

// About Us

pub async fn about_public(State(state): State<AppState>) -> Result<Json<Value>> {
    let row = settings::get_active_about(state.db.pool()).await?;
    row_or_empty(row)
}

pub async fn about_admin(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let row = settings::get_about(state.db.pool()).await?;
    row_or_empty(row)
}

pub async fn about_update(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Json(body): Json<AboutBody>,
) -> Result<Json<AboutSettings>> {
    let update = AboutUpdate {
        title: body.title,
        subtitle: body.subtitle,
        content: body.content,
        image_url: body.image_url,
        mission: body.mission,
        vision: body.vision,
        values: body.values,
        is_active: body.is_active.unwrap_or(false),
    };
    let row = settings::update_about(state.db.pool(), &update).await?;
    Ok(Json(row))
}

// Contact

pub async fn contact_public(State(state): State<AppState>) -> Result<Json<Value>> {
    let row = settings::get_active_contact(state.db.pool()).await?;
    row_or_empty(row)
}

pub async fn contact_admin(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let row = settings::get_contact(state.db.pool()).await?;
    row_or_empty(row)
}

pub async fn contact_update(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Json(body): Json<ContactBody>,
) -> Result<Json<ContactSettings>> {
    let update = ContactUpdate {
        title: body.title,
        subtitle: body.subtitle,
        phone: body.phone,
        email: body.email,
        address: body.address,
        business_hours: body.business_hours,
        social_links: body.social_links,
        map_embed_url: body.map_embed_url,
        is_active: body.is_active.unwrap_or(false),
    };
    let row = settings::update_contact(state.db.pool(), &update).await?;
    Ok(Json(row))
}

// Terms of Service

pub async fn terms_public(State(state): State<AppState>) -> Result<Json<Value>> {
    let row = settings::get_active_policy(state.db.pool(), PolicyKind::TermsOfService).await?;
    row_or_empty(row)
}

pub async fn terms_admin(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let row = settings::get_policy(state.db.pool(), PolicyKind::TermsOfService).await?;
    row_or_empty(row)
}

pub async fn terms_update(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Json(body): Json<PolicyBody>,
) -> Result<Json<PolicySettings>> {
    update_policy(&state, PolicyKind::TermsOfService, body).await
}

// Privacy Policy

pub async fn privacy_public(State(state): State<AppState>) -> Result<Json<Value>> {
    let row = settings::get_active_policy(state.db.pool(), PolicyKind::PrivacyPolicy).await?;
    row_or_empty(row)
}

pub async fn privacy_admin(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let row = settings::get_policy(state.db.pool(), PolicyKind::PrivacyPolicy).await?;
    row_or_empty(row)
}

pub async fn privacy_update(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Json(body): Json<PolicyBody>,
) -> Result<Json<PolicySettings>> {
    update_policy(&state, PolicyKind::PrivacyPolicy, body).await
}

async fn update_policy(
    state: &AppState,
    kind: PolicyKind,
    body: PolicyBody,
) -> Result<Json<PolicySettings>> {
    let update = PolicyUpdate {
        title: body.title,
        content: body.content,
        sections: body.sections,
        is_active: body.is_active.unwrap_or(false),
    };
    let row = settings::update_policy(state.db.pool(), kind, &update).await?;
    Ok(Json(row))
}
