//! Session rows consumed by the authorization gate.
//!
//! Sessions are issued by the external auth layer; this module only reads
//! them and caches the admin check result via `set_role_hint`.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Session;

/// Create a session for a user.
pub async fn create_session(pool: &SqlitePool, token: &str, user_id: &str) -> Result<Session> {
    sqlx::query(
        r#"
        INSERT INTO sessions (token, user_id)
        VALUES (?, ?)
        "#,
    )
    .bind(token)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Session",
                    id: token.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    get_session(pool, token).await
}

/// Get a session by token.
pub async fn get_session(pool: &SqlitePool, token: &str) -> Result<Session> {
    sqlx::query_as::<_, Session>(
        r#"
        SELECT token, user_id, role_hint, created_at
        FROM sessions
        WHERE token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Session",
        id: token.to_string(),
    })
}

/// Cache a role marker on the session so later checks skip the user lookup.
pub async fn set_role_hint(pool: &SqlitePool, token: &str, role: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE sessions
        SET role_hint = ?
        WHERE token = ?
        "#,
    )
    .bind(role)
    .bind(token)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Session",
            id: token.to_string(),
        });
    }

    Ok(())
}

/// Delete a session by token.
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE token = ?
        "#,
    )
    .bind(token)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Session",
            id: token.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let db = test_db().await;

        let session = create_session(db.pool(), "tok-1", "user-admin-1")
            .await
            .unwrap();
        assert_eq!(session.role_hint, None);

        set_role_hint(db.pool(), "tok-1", "admin").await.unwrap();
        let session = get_session(db.pool(), "tok-1").await.unwrap();
        assert_eq!(session.role_hint.as_deref(), Some("admin"));

        delete_session(db.pool(), "tok-1").await.unwrap();
        let gone = get_session(db.pool(), "tok-1").await;
        assert!(matches!(gone, Err(DatabaseError::NotFound { .. })));
    }
}
