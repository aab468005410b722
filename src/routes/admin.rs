use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::shipments::{InvoiceForm, NotificationList, PaymentForm, PriceDetailsForm, ShipmentList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Customer, Shipment},
    response::ApiResponse,
    routes::params::{Pagination, ShipmentListQuery},
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shipments", get(list_all_shipments))
        .route("/shipments/{id}", get(get_shipment_admin))
        .route("/shipments/{id}/accept", post(accept_shipment))
        .route("/shipments/{id}/price-details", put(save_price_details))
        .route("/shipments/{id}/invoice", post(confirm_invoice))
        .route("/shipments/{id}/request-payment", post(request_payment))
        .route("/shipments/{id}/payment", post(save_payment))
        .route("/shipments/{id}/ready", post(mark_ready))
        .route("/shipments/{id}/dispatch", post(dispatch_shipment))
        .route("/customers", get(list_customers))
        .route("/notifications", get(list_notifications))
}

#[utoipa::path(
    get,
    path = "/api/admin/shipments",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc, desc")
    ),
    responses(
        (status = 200, description = "Get all shipments (admin only)", body = ApiResponse<ShipmentList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_shipments(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ShipmentListQuery>,
) -> AppResult<Json<ApiResponse<ShipmentList>>> {
    let resp = admin_service::list_all_shipments(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/shipments/{id}",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    responses(
        (status = 200, description = "Get any shipment (admin only)", body = ApiResponse<Shipment>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_shipment_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Shipment>>> {
    let resp = admin_service::get_shipment_admin(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/shipments/{id}/accept",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    responses(
        (status = 200, description = "Accept a received shipment", body = ApiResponse<Shipment>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Invalid transition"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn accept_shipment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Shipment>>> {
    let resp = admin_service::accept_shipment(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/shipments/{id}/price-details",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    request_body = PriceDetailsForm,
    responses(
        (status = 200, description = "Save price details", body = ApiResponse<Shipment>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Invalid transition"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn save_price_details(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(form): Json<PriceDetailsForm>,
) -> AppResult<Json<ApiResponse<Shipment>>> {
    let resp = admin_service::save_price_details(&state, &user, id, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/shipments/{id}/invoice",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    request_body = InvoiceForm,
    responses(
        (status = 200, description = "Confirm invoice", body = ApiResponse<Shipment>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Invalid transition"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn confirm_invoice(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(form): Json<InvoiceForm>,
) -> AppResult<Json<ApiResponse<Shipment>>> {
    let resp = admin_service::confirm_invoice(&state, &user, id, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/shipments/{id}/request-payment",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    responses(
        (status = 200, description = "Request payment", body = ApiResponse<Shipment>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Invalid transition"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn request_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Shipment>>> {
    let resp = admin_service::request_payment(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/shipments/{id}/payment",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    request_body = PaymentForm,
    responses(
        (status = 200, description = "Record payment", body = ApiResponse<Shipment>),
        (status = 400, description = "Missing payment proof"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Invalid transition"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn save_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(form): Json<PaymentForm>,
) -> AppResult<Json<ApiResponse<Shipment>>> {
    let resp = admin_service::save_payment(&state, &user, id, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/shipments/{id}/ready",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    responses(
        (status = 200, description = "Mark ready to ship", body = ApiResponse<Shipment>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Invalid transition"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn mark_ready(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Shipment>>> {
    let resp = admin_service::mark_ready(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/shipments/{id}/dispatch",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    responses(
        (status = 200, description = "Dispatch shipment", body = ApiResponse<Shipment>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Invalid transition"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn dispatch_shipment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Shipment>>> {
    let resp = admin_service::dispatch_shipment(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/customers",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "List customers", body = ApiResponse<Vec<Customer>>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_customers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<Customer>>>> {
    let resp = admin_service::list_customers(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/notifications",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Transition notification feed", body = ApiResponse<NotificationList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<NotificationList>>> {
    let resp = admin_service::list_notifications(&state, &user, pagination).await?;
    Ok(Json(resp))
}
