//! CMS settings singletons: About Us, Contact, Terms of Service, Privacy
//! Policy.
//!
//! Each table conventionally holds exactly one row (id = 1), created by the
//! migration. Updates are full-record overwrites stamping `updated_at`; an
//! absent field nulls its column. Concurrent writes are last-write-wins,
//! which is fine for low-frequency admin edits. Public reads only see a row
//! whose `is_active` flag is set.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{AboutSettings, ContactSettings, PolicySettings};

/// Which of the two policy-shaped singletons to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    TermsOfService,
    PrivacyPolicy,
}

impl PolicyKind {
    fn table(self) -> &'static str {
        match self {
            PolicyKind::TermsOfService => "terms_of_service_settings",
            PolicyKind::PrivacyPolicy => "privacy_policy_settings",
        }
    }

    fn entity(self) -> &'static str {
        match self {
            PolicyKind::TermsOfService => "Terms of service settings",
            PolicyKind::PrivacyPolicy => "Privacy policy settings",
        }
    }
}

/// Full-record replacement for the About Us singleton.
#[derive(Debug, Clone, Default)]
pub struct AboutUpdate {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub values: Option<String>,
    pub is_active: bool,
}

/// Full-record replacement for the Contact singleton.
#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub business_hours: Option<String>,
    pub social_links: Option<String>,
    pub map_embed_url: Option<String>,
    pub is_active: bool,
}

/// Full-record replacement for a policy singleton.
#[derive(Debug, Clone, Default)]
pub struct PolicyUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub sections: Option<String>,
    pub is_active: bool,
}

const ABOUT_COLUMNS: &str =
    r#"id, title, subtitle, content, image_url, mission, vision, "values", is_active, updated_at"#;

/// Get the About Us row regardless of visibility.
pub async fn get_about(pool: &SqlitePool) -> Result<Option<AboutSettings>> {
    let row = sqlx::query_as::<_, AboutSettings>(&format!(
        "SELECT {ABOUT_COLUMNS} FROM about_us_settings WHERE id = 1"
    ))
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Get the About Us row only if it is publicly visible.
pub async fn get_active_about(pool: &SqlitePool) -> Result<Option<AboutSettings>> {
    let row = sqlx::query_as::<_, AboutSettings>(&format!(
        "SELECT {ABOUT_COLUMNS} FROM about_us_settings WHERE id = 1 AND is_active = 1"
    ))
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Overwrite the About Us row. Returns the updated row.
pub async fn update_about(pool: &SqlitePool, update: &AboutUpdate) -> Result<AboutSettings> {
    sqlx::query(
        r#"
        UPDATE about_us_settings
        SET title = ?, subtitle = ?, content = ?, image_url = ?,
            mission = ?, vision = ?, "values" = ?, is_active = ?,
            updated_at = datetime('now')
        WHERE id = 1
        "#,
    )
    .bind(&update.title)
    .bind(&update.subtitle)
    .bind(&update.content)
    .bind(&update.image_url)
    .bind(&update.mission)
    .bind(&update.vision)
    .bind(&update.values)
    .bind(update.is_active)
    .execute(pool)
    .await?;

    get_about(pool).await?.ok_or_else(|| DatabaseError::NotFound {
        entity: "About settings",
        id: "1".to_string(),
    })
}

const CONTACT_COLUMNS: &str = "id, title, subtitle, phone, email, address, business_hours, \
                               social_links, map_embed_url, is_active, updated_at";

/// Get the Contact row regardless of visibility.
pub async fn get_contact(pool: &SqlitePool) -> Result<Option<ContactSettings>> {
    let row = sqlx::query_as::<_, ContactSettings>(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contact_settings WHERE id = 1"
    ))
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Get the Contact row only if it is publicly visible.
pub async fn get_active_contact(pool: &SqlitePool) -> Result<Option<ContactSettings>> {
    let row = sqlx::query_as::<_, ContactSettings>(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contact_settings WHERE id = 1 AND is_active = 1"
    ))
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Overwrite the Contact row. Returns the updated row.
pub async fn update_contact(pool: &SqlitePool, update: &ContactUpdate) -> Result<ContactSettings> {
    sqlx::query(
        r#"
        UPDATE contact_settings
        SET title = ?, subtitle = ?, phone = ?, email = ?, address = ?,
            business_hours = ?, social_links = ?, map_embed_url = ?,
            is_active = ?, updated_at = datetime('now')
        WHERE id = 1
        "#,
    )
    .bind(&update.title)
    .bind(&update.subtitle)
    .bind(&update.phone)
    .bind(&update.email)
    .bind(&update.address)
    .bind(&update.business_hours)
    .bind(&update.social_links)
    .bind(&update.map_embed_url)
    .bind(update.is_active)
    .execute(pool)
    .await?;

    get_contact(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Contact settings",
            id: "1".to_string(),
        })
}

const POLICY_COLUMNS: &str = "id, title, content, sections, is_active, updated_at";

/// Get a policy row regardless of visibility.
pub async fn get_policy(pool: &SqlitePool, kind: PolicyKind) -> Result<Option<PolicySettings>> {
    let sql = format!("SELECT {POLICY_COLUMNS} FROM {} WHERE id = 1", kind.table());
    let row = sqlx::query_as::<_, PolicySettings>(&sql)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Get a policy row only if it is publicly visible.
pub async fn get_active_policy(
    pool: &SqlitePool,
    kind: PolicyKind,
) -> Result<Option<PolicySettings>> {
    let sql = format!(
        "SELECT {POLICY_COLUMNS} FROM {} WHERE id = 1 AND is_active = 1",
        kind.table()
    );
    let row = sqlx::query_as::<_, PolicySettings>(&sql)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Overwrite a policy row. Returns the updated row.
pub async fn update_policy(
    pool: &SqlitePool,
    kind: PolicyKind,
    update: &PolicyUpdate,
) -> Result<PolicySettings> {
    let sql = format!(
        "UPDATE {} SET title = ?, content = ?, sections = ?, is_active = ?, \
         updated_at = datetime('now') WHERE id = 1",
        kind.table()
    );
    sqlx::query(&sql)
        .bind(&update.title)
        .bind(&update.content)
        .bind(&update.sections)
        .bind(update.is_active)
        .execute(pool)
        .await?;

    get_policy(pool, kind)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: kind.entity(),
            id: "1".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    #[tokio::test]
    async fn test_about_visibility_flag() {
        let db = test_db().await;

        // Blank row exists from the migration but is not public.
        assert!(get_about(db.pool()).await.unwrap().is_some());
        assert!(get_active_about(db.pool()).await.unwrap().is_none());

        let updated = update_about(
            db.pool(),
            &AboutUpdate {
                title: Some("About Creamline".to_string()),
                is_active: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(updated.is_active);

        let public = get_active_about(db.pool()).await.unwrap().unwrap();
        assert_eq!(public.title.as_deref(), Some("About Creamline"));
    }

    #[tokio::test]
    async fn test_update_is_full_overwrite() {
        let db = test_db().await;

        update_about(
            db.pool(),
            &AboutUpdate {
                title: Some("About Creamline".to_string()),
                mission: Some("Fresh dairy daily".to_string()),
                is_active: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        // Second PUT omits mission: the column must be cleared, not kept.
        let updated = update_about(
            db.pool(),
            &AboutUpdate {
                title: Some("About Creamline".to_string()),
                is_active: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.mission, None);
    }

    #[tokio::test]
    async fn test_inactive_put_hides_public_row() {
        let db = test_db().await;

        update_contact(
            db.pool(),
            &ContactUpdate {
                phone: Some("+91-9876543210".to_string()),
                is_active: false,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(get_active_contact(db.pool()).await.unwrap().is_none());
        let admin_view = get_contact(db.pool()).await.unwrap().unwrap();
        assert_eq!(admin_view.phone.as_deref(), Some("+91-9876543210"));
    }

    #[tokio::test]
    async fn test_policy_kinds_are_independent() {
        let db = test_db().await;

        update_policy(
            db.pool(),
            PolicyKind::TermsOfService,
            &PolicyUpdate {
                title: Some("Terms of Service".to_string()),
                is_active: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let terms = get_active_policy(db.pool(), PolicyKind::TermsOfService)
            .await
            .unwrap();
        assert!(terms.is_some());

        let privacy = get_active_policy(db.pool(), PolicyKind::PrivacyPolicy)
            .await
            .unwrap();
        assert!(privacy.is_none());
    }
}
