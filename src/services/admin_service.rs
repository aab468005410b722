use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::shipments::{InvoiceForm, NotificationList, PaymentForm, PriceDetailsForm, ShipmentList},
    entity::shipments::{
        ActiveModel as ShipmentActive, Column as ShipmentCol, Entity as Shipments,
        Model as ShipmentModel,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Customer, Notification, Shipment},
    notify::notify_transition,
    response::{ApiResponse, Meta},
    routes::params::{Pagination, ShipmentListQuery, SortOrder},
    services::shipment_service::{shipment_from_entity, validate_status, workflow_state},
    state::AppState,
    workflow::ShipmentAction,
};

pub async fn list_all_shipments(
    state: &AppState,
    user: &AuthUser,
    query: ShipmentListQuery,
) -> AppResult<ApiResponse<ShipmentList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination.normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(ShipmentCol::Status.eq(validate_status(status)?.as_str()));
    }

    let mut finder = Shipments::find().filter(condition);

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(ShipmentCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(ShipmentCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(shipment_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Shipments",
        ShipmentList { items },
        Some(meta),
    ))
}

pub async fn get_shipment_admin(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Shipment>> {
    ensure_admin(user)?;
    let model = Shipments::find_by_id(id).one(&state.orm).await?;
    let model = match model {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success(
        "Shipment found",
        shipment_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn accept_shipment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Shipment>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;
    let model = load_for_update(&txn, id).await?;
    let wf = workflow_state(&model)?;
    ShipmentAction::Accept.check(wf)?;
    let next = ShipmentAction::Accept.target_status(wf.status);

    let mut active: ShipmentActive = model.into();
    active.status = Set(next.as_str().to_owned());
    active.updated_at = Set(Utc::now().into());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    let shipment = shipment_from_entity(model)?;
    after_transition(state, user, &shipment, ShipmentAction::Accept).await;
    Ok(ApiResponse::success(
        "Shipment accepted",
        shipment,
        Some(Meta::empty()),
    ))
}

/// Stores the price form and flips the flag; the status stays Accepted, so
/// the form can be reopened and corrected until the invoice is confirmed.
pub async fn save_price_details(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    form: PriceDetailsForm,
) -> AppResult<ApiResponse<Shipment>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;
    let model = load_for_update(&txn, id).await?;
    let wf = workflow_state(&model)?;
    ShipmentAction::SavePriceDetails.check(wf)?;

    let price_details = serde_json::to_value(&form)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    let mut active: ShipmentActive = model.into();
    if let Some(tracking_id) = form.tracking_id.as_ref().filter(|t| !t.is_empty()) {
        active.tracking_number = Set(tracking_id.clone());
    }
    active.price_details = Set(Some(price_details));
    active.price_details_added = Set(true);
    active.updated_at = Set(Utc::now().into());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    let shipment = shipment_from_entity(model)?;
    after_transition(state, user, &shipment, ShipmentAction::SavePriceDetails).await;
    Ok(ApiResponse::success(
        "Price details saved",
        shipment,
        Some(Meta::empty()),
    ))
}

pub async fn confirm_invoice(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    form: InvoiceForm,
) -> AppResult<ApiResponse<Shipment>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;
    let model = load_for_update(&txn, id).await?;
    let wf = workflow_state(&model)?;
    ShipmentAction::ConfirmInvoice.check(wf)?;
    let next = ShipmentAction::ConfirmInvoice.target_status(wf.status);

    let mut active: ShipmentActive = model.into();
    active.status = Set(next.as_str().to_owned());
    active.invoice_generated = Set(true);
    active.updated_at = Set(Utc::now().into());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    let shipment = shipment_from_entity(model)?;
    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "shipment_invoice_details",
        Some("shipments"),
        Some(serde_json::json!({
            "shipment_id": shipment.id,
            "courier": form.courier,
            "invoice_type": form.invoice_type,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    after_transition(state, user, &shipment, ShipmentAction::ConfirmInvoice).await;
    Ok(ApiResponse::success(
        "Invoice generated",
        shipment,
        Some(Meta::empty()),
    ))
}

pub async fn request_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Shipment>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;
    let model = load_for_update(&txn, id).await?;
    let wf = workflow_state(&model)?;
    ShipmentAction::RequestPay.check(wf)?;

    let mut active: ShipmentActive = model.into();
    active.payment_requested = Set(true);
    active.updated_at = Set(Utc::now().into());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    let shipment = shipment_from_entity(model)?;
    after_transition(state, user, &shipment, ShipmentAction::RequestPay).await;
    Ok(ApiResponse::success(
        "Payment requested",
        shipment,
        Some(Meta::empty()),
    ))
}

pub async fn save_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    form: PaymentForm,
) -> AppResult<ApiResponse<Shipment>> {
    ensure_admin(user)?;
    if form.proof.trim().is_empty() {
        return Err(AppError::BadRequest("payment proof is required".into()));
    }

    let txn = state.orm.begin().await?;
    let model = load_for_update(&txn, id).await?;
    let wf = workflow_state(&model)?;
    ShipmentAction::SavePayment.check(wf)?;
    let next = ShipmentAction::SavePayment.target_status(wf.status);

    let mut active: ShipmentActive = model.into();
    active.status = Set(next.as_str().to_owned());
    active.payment_received = Set(true);
    active.payment_proof = Set(Some(form.proof.clone()));
    active.updated_at = Set(Utc::now().into());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    let shipment = shipment_from_entity(model)?;
    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "shipment_payment_details",
        Some("shipments"),
        Some(serde_json::json!({
            "shipment_id": shipment.id,
            "payment_info": form.payment_info,
            "remarks": form.remarks,
            "approved_by": form.approved_by,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    after_transition(state, user, &shipment, ShipmentAction::SavePayment).await;
    Ok(ApiResponse::success(
        "Payment recorded",
        shipment,
        Some(Meta::empty()),
    ))
}

pub async fn mark_ready(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Shipment>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;
    let model = load_for_update(&txn, id).await?;
    let wf = workflow_state(&model)?;
    ShipmentAction::Ready.check(wf)?;
    let next = ShipmentAction::Ready.target_status(wf.status);

    let mut active: ShipmentActive = model.into();
    active.status = Set(next.as_str().to_owned());
    active.ready_to_ship = Set(true);
    active.updated_at = Set(Utc::now().into());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    let shipment = shipment_from_entity(model)?;
    after_transition(state, user, &shipment, ShipmentAction::Ready).await;
    Ok(ApiResponse::success(
        "Shipment ready to ship",
        shipment,
        Some(Meta::empty()),
    ))
}

pub async fn dispatch_shipment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Shipment>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;
    let model = load_for_update(&txn, id).await?;
    let wf = workflow_state(&model)?;
    ShipmentAction::Dispatch.check(wf)?;
    let next = ShipmentAction::Dispatch.target_status(wf.status);

    let mut active: ShipmentActive = model.into();
    active.status = Set(next.as_str().to_owned());
    active.dispatched = Set(true);
    active.updated_at = Set(Utc::now().into());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    let shipment = shipment_from_entity(model)?;
    after_transition(state, user, &shipment, ShipmentAction::Dispatch).await;
    Ok(ApiResponse::success(
        "Shipment dispatched",
        shipment,
        Some(Meta::empty()),
    ))
}

pub async fn list_customers(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<Vec<Customer>>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let customers = sqlx::query_as::<_, Customer>(
        "SELECT id, email, name, phone, address, created_at FROM users WHERE role = 'customer' ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = 'customer'")
        .fetch_one(&state.pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success("Customers", customers, Some(meta)))
}

pub async fn list_notifications(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<NotificationList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let items = sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notifications")
        .fetch_one(&state.pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success(
        "Notifications",
        NotificationList { items },
        Some(meta),
    ))
}

async fn load_for_update(txn: &DatabaseTransaction, id: Uuid) -> AppResult<ShipmentModel> {
    let model = Shipments::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?;
    match model {
        Some(m) => Ok(m),
        None => Err(AppError::NotFound),
    }
}

/// Notification plus audit row; neither may fail the committed transition.
async fn after_transition(
    state: &AppState,
    user: &AuthUser,
    shipment: &Shipment,
    action: ShipmentAction,
) {
    if let Err(err) = notify_transition(
        &state.pool,
        shipment.id,
        &shipment.reference,
        &shipment.display_status,
    )
    .await
    {
        tracing::warn!(error = %err, "notification insert failed");
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        &format!("shipment_{}", action.as_str()),
        Some("shipments"),
        Some(serde_json::json!({
            "shipment_id": shipment.id,
            "reference": shipment.reference,
            "status": shipment.display_status,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
}
