//! Contact submission inbox CRUD.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::ContactSubmission;

/// Fields for a new submission. Validated at the API boundary.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Record a visitor message. Starts in status "new".
pub async fn create_submission(
    pool: &SqlitePool,
    new: &NewSubmission,
) -> Result<ContactSubmission> {
    let result = sqlx::query(
        r#"
        INSERT INTO contact_submissions (name, email, message, status)
        VALUES (?, ?, ?, 'new')
        "#,
    )
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.message)
    .execute(pool)
    .await?;

    get_submission(pool, result.last_insert_rowid()).await
}

/// Get a submission by ID.
pub async fn get_submission(pool: &SqlitePool, id: i64) -> Result<ContactSubmission> {
    sqlx::query_as::<_, ContactSubmission>(
        r#"
        SELECT id, name, email, message, status, created_at, updated_at
        FROM contact_submissions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Contact submission",
        id: id.to_string(),
    })
}

/// List all submissions, newest first.
pub async fn list_submissions(pool: &SqlitePool) -> Result<Vec<ContactSubmission>> {
    let submissions = sqlx::query_as::<_, ContactSubmission>(
        r#"
        SELECT id, name, email, message, status, created_at, updated_at
        FROM contact_submissions
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(submissions)
}

/// Mark a submission as read. Idempotent: marking a read submission again
/// leaves it read.
pub async fn mark_read(pool: &SqlitePool, id: i64) -> Result<ContactSubmission> {
    let result = sqlx::query(
        r#"
        UPDATE contact_submissions
        SET status = 'read', updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Contact submission",
            id: id.to_string(),
        });
    }

    get_submission(pool, id).await
}

/// Delete a submission by ID.
pub async fn delete_submission(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM contact_submissions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Contact submission",
            id: id.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    fn submission(name: &str) -> NewSubmission {
        NewSubmission {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            message: "Do you deliver on Sundays?".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = test_db().await;
        let first = create_submission(db.pool(), &submission("alice"))
            .await
            .unwrap();
        let second = create_submission(db.pool(), &submission("bob"))
            .await
            .unwrap();

        let all = list_submissions(db.pool()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn test_mark_read_is_idempotent() {
        let db = test_db().await;
        let created = create_submission(db.pool(), &submission("alice"))
            .await
            .unwrap();
        assert_eq!(created.status, "new");

        let once = mark_read(db.pool(), created.id).await.unwrap();
        assert_eq!(once.status, "read");

        let twice = mark_read(db.pool(), created.id).await.unwrap();
        assert_eq!(twice.status, "read");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = test_db().await;
        let created = create_submission(db.pool(), &submission("alice"))
            .await
            .unwrap();

        delete_submission(db.pool(), created.id).await.unwrap();
        let again = delete_submission(db.pool(), created.id).await;
        assert!(matches!(again, Err(DatabaseError::NotFound { .. })));
    }
}
