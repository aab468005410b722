use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum_dropship_api::{config::AppConfig, db::create_pool, workflow::ShipmentStatus};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(&pool, "admin@example.com", "admin123", "admin").await?;
    let customer_id = ensure_user(&pool, "customer@example.com", "customer123", "customer").await?;
    seed_catalog(&pool).await?;
    seed_shipments(&pool, customer_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, Customer ID: {customer_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_optional(pool)
    .await?;

    // If user already exists, fetch id
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_catalog(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let categories = vec![
        ("Electronics", "Phones, chargers, accessories"),
        ("Apparel", "Clothing and footwear"),
        ("Home & Kitchen", "Household goods"),
    ];

    for (name, desc) in &categories {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(desc)
        .execute(pool)
        .await?;
    }

    let products = vec![
        ("Wireless Earbuds", "Electronics", 299000, 120),
        ("USB-C Fast Charger", "Electronics", 150000, 200),
        ("Cotton T-Shirt", "Apparel", 89000, 300),
        ("Stainless Water Bottle", "Home & Kitchen", 120000, 150),
    ];

    for (name, category, price, stock) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, category_id, name, description, price, stock)
            SELECT $1, c.id, $2, $3, $4, $5 FROM categories c WHERE c.name = $6
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(format!("{name} (dropship)"))
        .bind(price)
        .bind(stock)
        .bind(category)
        .execute(pool)
        .await?;
    }

    println!("Seeded catalog");
    Ok(())
}

// Sample rows spread across the pipeline; flags stay consistent with the
// status they accompany.
async fn seed_shipments(pool: &sqlx::PgPool, customer_id: Uuid) -> anyhow::Result<()> {
    let shipments = vec![
        ("SP-2125", "Arjun Mehta", "Mumbai, IN", ShipmentStatus::Received),
        ("SP-2126", "Sara Khan", "Dubai, AE", ShipmentStatus::Accepted),
        (
            "SP-2127",
            "Daniel Osei",
            "Accra, GH",
            ShipmentStatus::InvoiceGenerated,
        ),
        (
            "SP-2128",
            "Mei Lin",
            "Singapore, SG",
            ShipmentStatus::PaymentReceived,
        ),
        (
            "SP-2129",
            "Lucas Silva",
            "Sao Paulo, BR",
            ShipmentStatus::ReadyToShip,
        ),
        (
            "SP-2130",
            "Emma Novak",
            "Prague, CZ",
            ShipmentStatus::Dispatched,
        ),
    ];

    for (reference, customer_name, destination, status) in shipments {
        let price_details_added = status != ShipmentStatus::Received;
        let invoice_generated = matches!(
            status,
            ShipmentStatus::InvoiceGenerated
                | ShipmentStatus::PaymentReceived
                | ShipmentStatus::ReadyToShip
                | ShipmentStatus::Dispatched
        );
        let payment_received = matches!(
            status,
            ShipmentStatus::PaymentReceived
                | ShipmentStatus::ReadyToShip
                | ShipmentStatus::Dispatched
        );
        let ready_to_ship =
            matches!(status, ShipmentStatus::ReadyToShip | ShipmentStatus::Dispatched);
        let dispatched = status == ShipmentStatus::Dispatched;

        let details = serde_json::json!({
            "receiver_name": customer_name,
            "courier": "DHL",
            "package_method": "Box",
            "weight_kg": 2.5,
            "payment_mode": "Bank transfer",
        });

        sqlx::query(
            r#"
            INSERT INTO shipments (
                id, reference, user_id, tracking_number, customer_name, destination,
                status, price_details_added, invoice_generated, payment_requested,
                payment_received, ready_to_ship, dispatched, payment_proof, details
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (reference) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reference)
        .bind(customer_id)
        .bind(format!("TRK-{}", &reference[3..]))
        .bind(customer_name)
        .bind(destination)
        .bind(status.as_str())
        .bind(price_details_added)
        .bind(invoice_generated)
        .bind(invoice_generated)
        .bind(payment_received)
        .bind(ready_to_ship)
        .bind(dispatched)
        .bind(payment_received.then(|| "uploads/proof-placeholder.png".to_string()))
        .bind(details)
        .execute(pool)
        .await?;
    }

    println!("Seeded shipments");
    Ok(())
}
