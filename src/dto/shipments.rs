use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Notification, Shipment};

/// Receiver, courier and packaging info captured when the shipment request
/// is composed. Display-only: the workflow never touches these fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ShipmentDetails {
    pub receiver_name: Option<String>,
    pub receiver_phone: Option<String>,
    pub receiver_address: Option<String>,
    pub courier: Option<String>,
    pub package_method: Option<String>,
    pub weight_kg: Option<f64>,
    pub payment_mode: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShipmentRequest {
    pub customer_name: String,
    pub destination: String,
    pub estimated_delivery: Option<DateTime<Utc>>,
    #[serde(default)]
    pub details: ShipmentDetails,
}

/// Price-entry form. Totals are submitted, not computed; the back office
/// fills these in by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PriceDetailsForm {
    pub weight_kg: Option<f64>,
    pub shipping_charge: Option<i64>,
    pub handling_charge: Option<i64>,
    pub quantity: Option<i32>,
    pub courier: Option<String>,
    pub tracking_id: Option<String>,
    pub tax: Option<i64>,
    pub shipment_total: Option<i64>,
    pub discount: Option<i64>,
    pub advance_paid: Option<i64>,
    pub grand_total: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InvoiceForm {
    pub courier: Option<String>,
    pub invoice_type: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentForm {
    pub payment_info: Option<String>,
    pub remarks: Option<String>,
    pub approved_by: Option<String>,
    /// Reference to the uploaded proof artifact; required.
    pub proof: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ShipmentList {
    #[schema(value_type = Vec<Shipment>)]
    pub items: Vec<Shipment>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct NotificationList {
    #[schema(value_type = Vec<Notification>)]
    pub items: Vec<Notification>,
}
