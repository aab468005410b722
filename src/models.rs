use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::shipments::{PriceDetailsForm, ShipmentDetails};
use crate::workflow::ShipmentStatus;

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

/// A customer as shown in the admin console; never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Shipment {
    pub id: Uuid,
    pub reference: String,
    pub user_id: Uuid,
    pub tracking_number: String,
    pub customer_name: String,
    pub destination: String,
    pub request_date: DateTime<Utc>,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub status: ShipmentStatus,
    /// Derived label; see [`crate::workflow::display_status`].
    pub display_status: String,
    pub price_details_added: bool,
    pub invoice_generated: bool,
    pub payment_requested: bool,
    pub payment_received: bool,
    pub ready_to_ship: bool,
    pub dispatched: bool,
    pub payment_proof: Option<String>,
    pub details: ShipmentDetails,
    pub price_details: Option<PriceDetailsForm>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub shipment_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
