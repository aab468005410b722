use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::shipments::{CreateShipmentRequest, ShipmentList},
    entity::shipments::{
        ActiveModel as ShipmentActive, Column as ShipmentCol, Entity as Shipments,
        Model as ShipmentModel,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Shipment,
    response::{ApiResponse, Meta},
    routes::params::{ShipmentListQuery, SortOrder},
    state::AppState,
    workflow::{self, ShipmentStatus, WorkflowState},
};

/// Customer submits a shipment request; it enters the pipeline as Received.
pub async fn create_shipment(
    state: &AppState,
    user: &AuthUser,
    payload: CreateShipmentRequest,
) -> AppResult<ApiResponse<Shipment>> {
    if payload.customer_name.trim().is_empty() {
        return Err(AppError::BadRequest("customer_name is required".into()));
    }
    if payload.destination.trim().is_empty() {
        return Err(AppError::BadRequest("destination is required".into()));
    }

    let id = Uuid::new_v4();
    let reference = build_reference(id);
    let tracking_number = build_tracking_number(id);
    let details = serde_json::to_value(&payload.details)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    let active = ShipmentActive {
        id: Set(id),
        reference: Set(reference),
        user_id: Set(user.user_id),
        tracking_number: Set(tracking_number),
        customer_name: Set(payload.customer_name),
        destination: Set(payload.destination),
        request_date: NotSet,
        estimated_delivery: Set(payload.estimated_delivery.map(Into::into)),
        status: Set(ShipmentStatus::Received.as_str().to_owned()),
        price_details_added: Set(false),
        invoice_generated: Set(false),
        payment_requested: Set(false),
        payment_received: Set(false),
        ready_to_ship: Set(false),
        dispatched: Set(false),
        payment_proof: Set(None),
        details: Set(details),
        price_details: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let model = active.insert(&state.orm).await?;
    let shipment = shipment_from_entity(model)?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "shipment_create",
        Some("shipments"),
        Some(serde_json::json!({ "shipment_id": shipment.id, "reference": shipment.reference })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Shipment request created",
        shipment,
        Some(Meta::empty()),
    ))
}

pub async fn list_shipments(
    state: &AppState,
    user: &AuthUser,
    query: ShipmentListQuery,
) -> AppResult<ApiResponse<ShipmentList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all().add(ShipmentCol::UserId.eq(user.user_id));
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(ShipmentCol::Status.eq(validate_status(status)?.as_str()));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Shipments::find().filter(condition);
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
        "Ok",
        ShipmentList { items },
        Some(meta),
    ))
}

pub async fn get_shipment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Shipment>> {
    let model = Shipments::find()
        .filter(
            Condition::all()
                .add(ShipmentCol::UserId.eq(user.user_id))
                .add(ShipmentCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?;
    let model = match model {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success(
        "OK",
        shipment_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

/// Reject unknown status filters before they hit the query.
pub(crate) fn validate_status(value: &str) -> AppResult<ShipmentStatus> {
    ShipmentStatus::parse(value)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid shipment status \"{value}\"")))
}

pub(crate) fn workflow_state(model: &ShipmentModel) -> AppResult<WorkflowState> {
    let status = ShipmentStatus::parse(&model.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "shipment {} has unknown status \"{}\"",
            model.id,
            model.status
        ))
    })?;
    Ok(WorkflowState {
        status,
        price_details_added: model.price_details_added,
        payment_requested: model.payment_requested,
    })
}

pub(crate) fn shipment_from_entity(model: ShipmentModel) -> AppResult<Shipment> {
    let state = workflow_state(&model)?;
    let display_status = workflow::display_status(state).to_owned();
    let details = serde_json::from_value(model.details).unwrap_or_default();
    let price_details = model
        .price_details
        .and_then(|v| serde_json::from_value(v).ok());

    Ok(Shipment {
        id: model.id,
        reference: model.reference,
        user_id: model.user_id,
        tracking_number: model.tracking_number,
        customer_name: model.customer_name,
        destination: model.destination,
        request_date: model.request_date.with_timezone(&Utc),
        estimated_delivery: model.estimated_delivery.map(|dt| dt.with_timezone(&Utc)),
        status: state.status,
        display_status,
        price_details_added: model.price_details_added,
        invoice_generated: model.invoice_generated,
        payment_requested: model.payment_requested,
        payment_received: model.payment_received,
        ready_to_ship: model.ready_to_ship,
        dispatched: model.dispatched,
        payment_proof: model.payment_proof,
        details,
        price_details,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

fn build_reference(shipment_id: Uuid) -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix = shipment_id.to_string();
    let short = &suffix[..8];
    format!("SP-{}-{}", date, short)
}

fn build_tracking_number(shipment_id: Uuid) -> String {
    let suffix = shipment_id.simple().to_string();
    format!("TRK-{}", &suffix[..12].to_uppercase())
}
