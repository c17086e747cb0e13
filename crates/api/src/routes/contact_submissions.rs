//! Contact submission routes: public form POST, admin inbox.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use database::contact_submission::{self, NewSubmission};
use database::{validation, ContactSubmission};

use crate::auth::AdminIdentity;
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Public contact form body. All three fields are required.
#[derive(Deserialize)]
pub struct SubmitBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Response for a deleted submission.
#[derive(Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

/// Public: submit the contact form.
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<SubmitBody>,
) -> Result<(StatusCode, Json<ContactSubmission>)> {
    let name = body.name.unwrap_or_default();
    let email = body.email.unwrap_or_default();
    let message = body.message.unwrap_or_default();

    validation::validate_contact_submission(&name, &email, &message)
        .map_err(|_| ApiError::Validation("All fields required".to_string()))?;

    let submission = contact_submission::create_submission(
        state.db.pool(),
        &NewSubmission {
            name,
            email,
            message,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(submission)))
}

/// Admin: list all submissions, newest first.
pub async fn list(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactSubmission>>> {
    let submissions = contact_submission::list_submissions(state.db.pool()).await?;
    Ok(Json(submissions))
}

/// Admin: mark a submission as read. Idempotent.
pub async fn mark_read(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ContactSubmission>> {
    let submission = contact_submission::mark_read(state.db.pool(), id).await?;
    Ok(Json(submission))
}

/// Admin: delete a submission.
pub async fn remove(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeletedResponse>> {
    contact_submission::delete_submission(state.db.pool(), id).await?;
    Ok(Json(DeletedResponse {
        message: "Deleted".to_string(),
    }))
}
