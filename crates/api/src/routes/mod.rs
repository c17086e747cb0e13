//! Route handlers for the storefront API.

pub mod cms;
pub mod contact_submissions;
pub mod health;
pub mod subscriptions;


use axum::routing::{delete, get, patch, post, put};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // CMS pages: public read, admin read/overwrite
        .route("/api/cms/about-us/public", get(cms::about_public))
        .route(
            "/api/cms/about-us",
            get(cms::about_admin).put(cms::about_update),
        )
        .route("/api/cms/contact/public", get(cms::contact_public))
        .route(
            "/api/cms/contact",
            get(cms::contact_admin).put(cms::contact_update),
        )
        .route("/api/cms/terms-of-service/public", get(cms::terms_public))
        .route(
            "/api/cms/terms-of-service",
            get(cms::terms_admin).put(cms::terms_update),
        )
        .route("/api/cms/privacy-policy/public", get(cms::privacy_public))
        .route(
            "/api/cms/privacy-policy",
            get(cms::privacy_admin).put(cms::privacy_update),
        )
        // Contact submissions
        .route("/api/contact-submissions", post(contact_submissions::submit))
        .route(
            "/api/admin/contact-submissions",
            get(contact_submissions::list),
        )
        .route(
            "/api/admin/contact-submissions/:id/read",
            put(contact_submissions::mark_read),
        )
        .route(
            "/api/admin/contact-submissions/:id",
            delete(contact_submissions::remove),
        )
        // Subscriptions
        .route(
            "/api/admin/subscriptions",
            get(subscriptions::list).post(subscriptions::create),
        )
        .route(
            "/api/admin/subscriptions/today/requirement",
            get(subscriptions::today_requirement),
        )
        .route(
            "/api/admin/subscriptions/:id/status",
            patch(subscriptions::update_status),
        )
        .route(
            "/api/admin/subscriptions/:id",
            delete(subscriptions::remove),
        )
}
