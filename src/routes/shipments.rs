use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::shipments::{CreateShipmentRequest, ShipmentList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Shipment,
    response::ApiResponse,
    routes::params::ShipmentListQuery,
    services::shipment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shipments).post(create_shipment))
        .route("/{id}", get(get_shipment))
}

#[utoipa::path(
    post,
    path = "/api/shipments",
    request_body = CreateShipmentRequest,
    responses(
        (status = 201, description = "Create shipment request", body = ApiResponse<Shipment>),
        (status = 400, description = "Bad Request"),
    ),
    security(("bearer_auth" = [])),
    tag = "Shipments"
)]
pub async fn create_shipment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateShipmentRequest>,
) -> AppResult<Json<ApiResponse<Shipment>>> {
    let resp = shipment_service::create_shipment(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shipments",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc, desc")
    ),
    responses(
        (status = 200, description = "List own shipments", body = ApiResponse<ShipmentList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Shipments"
)]
pub async fn list_shipments(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ShipmentListQuery>,
) -> AppResult<Json<ApiResponse<ShipmentList>>> {
    let resp = shipment_service::list_shipments(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shipments/{id}",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    responses(
        (status = 200, description = "Get own shipment", body = ApiResponse<Shipment>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Shipments"
)]
pub async fn get_shipment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Shipment>>> {
    let resp = shipment_service::get_shipment(&state, &user, id).await?;
    Ok(Json(resp))
}
