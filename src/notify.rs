//! Notification sink for workflow transitions.
//!
//! Every successful transition leaves one row behind; the back office reads
//! them as its toast/activity feed. A failed insert must never undo the
//! transition itself, so callers log the error and move on, same as the
//! audit log.

use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

pub async fn notify_transition(
    pool: &DbPool,
    shipment_id: Uuid,
    reference: &str,
    status_label: &str,
) -> AppResult<()> {
    let message = format!("Shipment {reference} status changed to {status_label}");
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO notifications (id, shipment_id, message)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(id)
    .bind(shipment_id)
    .bind(&message)
    .execute(pool)
    .await?;

    tracing::info!(shipment_id = %shipment_id, %message, "shipment transition");

    Ok(())
}
