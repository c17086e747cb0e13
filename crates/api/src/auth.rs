//! Admin authorization gate.
//!
//! Admin handlers take an [`AdminIdentity`] argument; axum runs the gate
//! once per request before the handler body executes. The decision is
//! binary: allow, or reject with 401/403 (500 on a store failure).

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use database::DatabaseError;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated admin behind the current request.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    /// User id the session resolves to.
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::Unauthenticated)?;
        let pool = state.db.pool();

        let session = match database::session::get_session(pool, token).await {
            Ok(session) => session,
            Err(DatabaseError::NotFound { .. }) => return Err(ApiError::Unauthenticated),
            Err(err) => return Err(ApiError::Database(err)),
        };

        // A prior successful check cached the role on the session.
        if session.role_hint.as_deref() == Some("admin") {
            return Ok(AdminIdentity {
                user_id: session.user_id,
            });
        }

        let user = match database::user::get_user(pool, &session.user_id).await {
            Ok(user) => user,
            Err(DatabaseError::NotFound { .. }) => return Err(ApiError::Forbidden),
            Err(err) => return Err(ApiError::Database(err)),
        };

        if user.role != "admin" {
            return Err(ApiError::Forbidden);
        }

        // Cache the result so later requests on this session skip the user
        // lookup. Failure to cache never fails the request.
        if let Err(err) = database::session::set_role_hint(pool, token, "admin").await {
            tracing::warn!(error = %err, "Failed to cache admin role on session");
        }

        Ok(AdminIdentity { user_id: user.id })
    }
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
