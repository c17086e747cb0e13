//! User CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::User;

/// Fields for a new user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub phone: Option<String>,
    pub wallet_balance: String,
}

/// Create a new user.
pub async fn create_user(pool: &SqlitePool, user: &NewUser) -> Result<User> {
    sqlx::query(
        r#"
        INSERT INTO users (id, email, first_name, last_name, role, phone, wallet_balance)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.id)
    .bind(&user.email)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.role)
    .bind(&user.phone)
    .bind(&user.wallet_balance)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "User",
                    id: user.id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    get_user(pool, &user.id).await
}

/// Get a user by ID.
pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, first_name, last_name, role, phone, wallet_balance, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Get the users matching any of the given IDs. Missing IDs are simply
/// absent from the result; callers decide what a gap means.
pub async fn get_users_by_ids(pool: &SqlitePool, ids: &[String]) -> Result<Vec<User>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT id, email, first_name, last_name, role, phone, wallet_balance, created_at \
         FROM users WHERE id IN ({placeholders})"
    );

    let mut query = sqlx::query_as::<_, User>(&sql);
    for id in ids {
        query = query.bind(id);
    }

    Ok(query.fetch_all(pool).await?)
}

/// List all users.
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, first_name, last_name, role, phone, wallet_balance, created_at
        FROM users
        ORDER BY created_at, id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Count total users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    fn customer(n: u32) -> NewUser {
        NewUser {
            id: format!("user-customer-{n}"),
            email: format!("customer{n}@creamline.test"),
            first_name: "Customer".to_string(),
            last_name: format!("{n}"),
            role: "customer".to_string(),
            phone: None,
            wallet_balance: "0".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_users_by_ids_skips_missing() {
        let db = test_db().await;
        user_fixtures(&db).await;

        let found = get_users_by_ids(
            db.pool(),
            &[
                "user-customer-1".to_string(),
                "user-customer-2".to_string(),
                "user-ghost".to_string(),
            ],
        )
        .await
        .unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|u| u.id.starts_with("user-customer-")));
    }

    #[tokio::test]
    async fn test_get_users_by_ids_empty_input() {
        let db = test_db().await;
        let found = get_users_by_ids(db.pool(), &[]).await.unwrap();
        assert!(found.is_empty());
    }

    async fn user_fixtures(db: &crate::Database) {
        for n in 1..=2 {
            create_user(db.pool(), &customer(n)).await.unwrap();
        }
    }
}
