//! Demo data seeding.
//!
//! Runs at startup, after migrations. A store with any user at all is
//! considered already seeded and left alone, so reruns are no-ops.

use sqlx::SqlitePool;

use crate::delivery::NewDelivery;
use crate::error::Result;
use crate::product::NewProduct;
use crate::settings::{AboutUpdate, ContactUpdate, PolicyKind, PolicyUpdate};
use crate::subscription::NewSubscription;
use crate::user::NewUser;
use crate::{delivery, product, settings, subscription, user};

/// Seed demo users, products, subscriptions, and CMS content if the store
/// is empty.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<()> {
    if user::count_users(pool).await? > 0 {
        tracing::info!("Database already seeded, skipping");
        return Ok(());
    }

    tracing::info!("Seeding database with demo data...");

    seed_users(pool).await?;
    let products = seed_products(pool).await?;
    seed_subscriptions(pool, &products).await?;
    seed_cms(pool).await?;

    tracing::info!("Seeding complete");
    Ok(())
}

async fn seed_users(pool: &SqlitePool) -> Result<()> {
    let users = [
        NewUser {
            id: "user-customer-1".to_string(),
            email: "customer1@creamline.test".to_string(),
            first_name: "Priya".to_string(),
            last_name: "Patel".to_string(),
            role: "customer".to_string(),
            phone: Some("+91-9876543210".to_string()),
            wallet_balance: "500.00".to_string(),
        },
        NewUser {
            id: "user-customer-2".to_string(),
            email: "customer2@creamline.test".to_string(),
            first_name: "Rahul".to_string(),
            last_name: "Mehta".to_string(),
            role: "customer".to_string(),
            phone: Some("+91-9876543211".to_string()),
            wallet_balance: "300.00".to_string(),
        },
        NewUser {
            id: "user-vendor-1".to_string(),
            email: "vendor1@creamline.test".to_string(),
            first_name: "Rajesh".to_string(),
            last_name: "Kumar".to_string(),
            role: "vendor".to_string(),
            phone: Some("+91-9876543212".to_string()),
            wallet_balance: "0".to_string(),
        },
        NewUser {
            id: "user-delivery-1".to_string(),
            email: "delivery1@creamline.test".to_string(),
            first_name: "Suresh".to_string(),
            last_name: "Singh".to_string(),
            role: "delivery".to_string(),
            phone: Some("+91-9876543214".to_string()),
            wallet_balance: "0".to_string(),
        },
        NewUser {
            id: "user-admin-1".to_string(),
            email: "admin1@creamline.test".to_string(),
            first_name: "Admin".to_string(),
            last_name: "Super".to_string(),
            role: "admin".to_string(),
            phone: Some("+91-9876543216".to_string()),
            wallet_balance: "0".to_string(),
        },
    ];

    for new in &users {
        user::create_user(pool, new).await?;
    }
    tracing::info!(count = users.len(), "Created demo users");
    Ok(())
}

async fn seed_products(pool: &SqlitePool) -> Result<Vec<crate::Product>> {
    let catalog = [
        NewProduct {
            name: "Full Cream Milk".to_string(),
            sku: "MILK-FC-001".to_string(),
            description: Some("Rich and creamy full cream milk".to_string()),
            category: "MILK".to_string(),
            price: "60.00".to_string(),
            unit: "L".to_string(),
            stock: 100,
            image_url: Some("/images/full_cream_milk.png".to_string()),
            is_active: true,
        },
        NewProduct {
            name: "Toned Milk".to_string(),
            sku: "MILK-TN-002".to_string(),
            description: Some("Healthy toned milk with reduced fat".to_string()),
            category: "MILK".to_string(),
            price: "50.00".to_string(),
            unit: "L".to_string(),
            stock: 150,
            image_url: Some("/images/toned_milk.png".to_string()),
            is_active: true,
        },
        NewProduct {
            name: "Fresh Curd".to_string(),
            sku: "DAIRY-CURD-001".to_string(),
            description: Some("Thick and creamy fresh curd".to_string()),
            category: "DAIRY".to_string(),
            price: "40.00".to_string(),
            unit: "500g".to_string(),
            stock: 80,
            image_url: Some("/images/fresh_curd.png".to_string()),
            is_active: true,
        },
        NewProduct {
            name: "Paneer".to_string(),
            sku: "DAIRY-PANEER-001".to_string(),
            description: Some("Fresh cottage cheese".to_string()),
            category: "DAIRY".to_string(),
            price: "120.00".to_string(),
            unit: "250g".to_string(),
            stock: 50,
            image_url: Some("/images/paneer.png".to_string()),
            is_active: true,
        },
        NewProduct {
            name: "Buttermilk".to_string(),
            sku: "DAIRY-BM-001".to_string(),
            description: Some("Refreshing traditional buttermilk".to_string()),
            category: "DAIRY".to_string(),
            price: "25.00".to_string(),
            unit: "500ml".to_string(),
            stock: 120,
            image_url: Some("/images/buttermilk.png".to_string()),
            is_active: true,
        },
    ];

    let mut created = Vec::with_capacity(catalog.len());
    for new in &catalog {
        created.push(product::create_product(pool, new).await?);
    }
    tracing::info!(count = created.len(), "Created demo products");
    Ok(created)
}

async fn seed_subscriptions(pool: &SqlitePool, products: &[crate::Product]) -> Result<()> {
    let full_cream = &products[0];
    let toned = &products[1];

    let subs = [
        NewSubscription {
            user_id: "user-customer-1".to_string(),
            product_id: full_cream.id,
            quantity: "2".to_string(),
            frequency: "daily".to_string(),
            delivery_time: "6:00 AM".to_string(),
            start_date: "2026-01-01".to_string(),
            price_per_l: full_cream.price.clone(),
            next_delivery_date: "2026-01-01".to_string(),
        },
        NewSubscription {
            user_id: "user-customer-1".to_string(),
            product_id: toned.id,
            quantity: "1".to_string(),
            frequency: "daily".to_string(),
            delivery_time: "6:30 AM".to_string(),
            start_date: "2026-01-01".to_string(),
            price_per_l: toned.price.clone(),
            next_delivery_date: "2026-01-01".to_string(),
        },
        NewSubscription {
            user_id: "user-customer-2".to_string(),
            product_id: full_cream.id,
            quantity: "1".to_string(),
            frequency: "daily".to_string(),
            delivery_time: "7:00 AM".to_string(),
            start_date: "2026-01-05".to_string(),
            price_per_l: full_cream.price.clone(),
            next_delivery_date: "2026-01-05".to_string(),
        },
    ];

    for new in &subs {
        let sub = subscription::create_subscription(pool, new).await?;
        delivery::create_delivery(
            pool,
            &NewDelivery {
                subscription_id: sub.id,
                delivery_date: new.next_delivery_date.clone(),
                quantity: new.quantity.clone(),
            },
        )
        .await?;
    }
    tracing::info!(count = subs.len(), "Created demo subscriptions");
    Ok(())
}

async fn seed_cms(pool: &SqlitePool) -> Result<()> {
    settings::update_about(
        pool,
        &AboutUpdate {
            title: Some("About Creamline".to_string()),
            subtitle: Some("Pure. Fresh. Daily.".to_string()),
            content: Some(
                "Creamline is an eco-friendly dairy delivery platform bringing fresh dairy \
                 products directly to your doorstep while supporting local farmers."
                    .to_string(),
            ),
            image_url: Some("/images/full_cream_milk.png".to_string()),
            mission: Some(
                "Provide fresh dairy products while supporting local farmers and sustainable \
                 practices."
                    .to_string(),
            ),
            vision: Some(
                "Become the dairy delivery platform known for quality and reliability.".to_string(),
            ),
            values: Some(
                serde_json::json!([
                    { "title": "Farm Fresh", "description": "Sourced directly from trusted local farms" },
                    { "title": "Pure & Natural", "description": "No additives or preservatives" },
                    { "title": "Supporting Farmers", "description": "Fair pricing for our farming partners" }
                ])
                .to_string(),
            ),
            is_active: true,
        },
    )
    .await?;

    settings::update_contact(
        pool,
        &ContactUpdate {
            title: Some("Contact Us".to_string()),
            subtitle: Some("We'd love to hear from you.".to_string()),
            phone: Some("+91-9876543210".to_string()),
            email: Some("support@creamline.test".to_string()),
            address: Some("123 Dairy Lane, Mumbai, Maharashtra 400001".to_string()),
            business_hours: Some("Mon-Sat: 6:00 AM - 10:00 PM".to_string()),
            social_links: Some(
                serde_json::json!({
                    "facebook": "https://facebook.com/creamline",
                    "instagram": "https://instagram.com/creamline"
                })
                .to_string(),
            ),
            map_embed_url: None,
            is_active: true,
        },
    )
    .await?;

    settings::update_policy(
        pool,
        PolicyKind::TermsOfService,
        &PolicyUpdate {
            title: Some("Terms of Service".to_string()),
            content: Some(
                "By using Creamline you agree to the terms and conditions below.".to_string(),
            ),
            sections: Some(
                serde_json::json!([
                    { "title": "Service Description", "content": "Creamline delivers dairy products to customers in selected areas." },
                    { "title": "Delivery Terms", "content": "Deliveries are made during the chosen time slot; delays may occur." },
                    { "title": "Returns & Refunds", "content": "Defective products may be returned within 24 hours of delivery." }
                ])
                .to_string(),
            ),
            is_active: true,
        },
    )
    .await?;

    settings::update_policy(
        pool,
        PolicyKind::PrivacyPolicy,
        &PolicyUpdate {
            title: Some("Privacy Policy".to_string()),
            content: Some(
                "This policy explains how we collect, use, and protect your information."
                    .to_string(),
            ),
            sections: Some(
                serde_json::json!([
                    { "title": "Data Collection", "content": "We collect name, phone, email, and address to provide delivery services." },
                    { "title": "Data Usage", "content": "Your data is used only for order processing, delivery, and support." },
                    { "title": "Third-Party Sharing", "content": "We do not share your data without your consent." }
                ])
                .to_string(),
            ),
            is_active: true,
        },
    )
    .await?;

    tracing::info!("Created CMS content for all four pages");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;
    use crate::{product, settings, subscription, user};

    #[tokio::test]
    async fn test_seed_twice_yields_one_data_set() {
        let db = test_db().await;

        seed_if_empty(db.pool()).await.unwrap();
        seed_if_empty(db.pool()).await.unwrap();

        let users = user::list_users(db.pool()).await.unwrap();
        assert_eq!(users.len(), 5);

        let catalog = product::list_products(db.pool()).await.unwrap();
        assert_eq!(catalog.len(), 5);

        let subs = subscription::list_subscriptions(db.pool()).await.unwrap();
        assert_eq!(subs.len(), 3);

        let about = settings::get_active_about(db.pool()).await.unwrap();
        assert!(about.is_some());
    }

    #[tokio::test]
    async fn test_seeded_subscriptions_snapshot_catalog_price() {
        let db = test_db().await;
        seed_if_empty(db.pool()).await.unwrap();

        let details = subscription::list_with_details(db.pool()).await.unwrap();
        for row in &details {
            let product = row.product.as_ref().unwrap();
            assert_eq!(row.subscription.price_per_l, product.price);
        }
    }
}
