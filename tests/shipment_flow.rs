use axum_dropship_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::shipments::{
        CreateShipmentRequest, InvoiceForm, PaymentForm, PriceDetailsForm, ShipmentDetails,
    },
    entity::users::ActiveModel as UserActive,
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{Pagination, ShipmentListQuery},
    services::{admin_service, shipment_service},
    state::AppState,
    workflow::ShipmentStatus,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

// Integration flow: customer creates a shipment request, staff walk it through
// the whole pipeline; every out-of-order operation is rejected.
#[tokio::test]
async fn shipment_walks_the_full_pipeline() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(());
            }
        };

    let state = setup_state(&database_url).await?;

    let customer_id = create_user(&state, "customer", "customer@example.com").await?;
    let admin_id = create_user(&state, "admin", "admin@example.com").await?;

    let customer = AuthUser {
        user_id: customer_id,
        role: "customer".into(),
    };
    let admin = AuthUser {
        user_id: admin_id,
        role: "admin".into(),
    };

    // Customer files a shipment request; it enters the pipeline as Received.
    let created = shipment_service::create_shipment(
        &state,
        &customer,
        CreateShipmentRequest {
            customer_name: "Sara Khan".into(),
            destination: "Dubai, AE".into(),
            estimated_delivery: None,
            details: ShipmentDetails {
                receiver_name: Some("Omar Khan".into()),
                courier: Some("DHL".into()),
                weight_kg: Some(2.5),
                ..Default::default()
            },
        },
    )
    .await?;
    let shipment = created.data.unwrap();
    assert_eq!(shipment.status, ShipmentStatus::Received);
    assert_eq!(shipment.display_status, "Received");
    assert!(shipment.reference.starts_with("SP-"));
    assert!(!shipment.price_details_added);
    let id = shipment.id;

    // Customers cannot drive the workflow.
    let err = admin_service::accept_shipment(&state, &customer, id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Unknown ids surface NotFound, not a silent no-op.
    let err = admin_service::accept_shipment(&state, &admin, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let accepted = admin_service::accept_shipment(&state, &admin, id)
        .await?
        .data
        .unwrap();
    assert_eq!(accepted.status, ShipmentStatus::Accepted);

    // Accepting twice is an invalid transition.
    let err = admin_service::accept_shipment(&state, &admin, id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));

    // No invoice before price details exist.
    let err = admin_service::confirm_invoice(&state, &admin, id, InvoiceForm {
        courier: None,
        invoice_type: None,
    })
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));

    let priced = admin_service::save_price_details(&state, &admin, id, PriceDetailsForm {
        weight_kg: Some(2.5),
        shipping_charge: Some(45000),
        quantity: Some(1),
        courier: Some("DHL".into()),
        tracking_id: Some("DHL-994-001".into()),
        grand_total: Some(52000),
        ..Default::default()
    })
    .await?
    .data
    .unwrap();
    assert!(priced.price_details_added);
    assert_eq!(priced.status, ShipmentStatus::Accepted);
    assert_eq!(priced.display_status, "Price Details Added");
    assert_eq!(priced.tracking_number, "DHL-994-001");

    let invoiced = admin_service::confirm_invoice(&state, &admin, id, InvoiceForm {
        courier: Some("DHL".into()),
        invoice_type: Some("standard".into()),
    })
    .await?
    .data
    .unwrap();
    assert_eq!(invoiced.status, ShipmentStatus::InvoiceGenerated);
    assert!(invoiced.invoice_generated);

    // Payment cannot be recorded before it was requested.
    let err = admin_service::save_payment(&state, &admin, id, payment_form("uploads/proof.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));

    let requested = admin_service::request_payment(&state, &admin, id)
        .await?
        .data
        .unwrap();
    assert!(requested.payment_requested);
    assert_eq!(requested.status, ShipmentStatus::InvoiceGenerated);
    assert_eq!(requested.display_status, "Payment Requested");

    let err = admin_service::request_payment(&state, &admin, id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));

    // Proof is mandatory.
    let err = admin_service::save_payment(&state, &admin, id, payment_form("  "))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let paid = admin_service::save_payment(&state, &admin, id, payment_form("uploads/proof.png"))
        .await?
        .data
        .unwrap();
    assert_eq!(paid.status, ShipmentStatus::PaymentReceived);
    assert!(paid.payment_received);
    assert_eq!(paid.payment_proof.as_deref(), Some("uploads/proof.png"));

    let ready = admin_service::mark_ready(&state, &admin, id).await?.data.unwrap();
    assert_eq!(ready.status, ShipmentStatus::ReadyToShip);
    assert!(ready.ready_to_ship);

    let dispatched = admin_service::dispatch_shipment(&state, &admin, id)
        .await?
        .data
        .unwrap();
    assert_eq!(dispatched.status, ShipmentStatus::Dispatched);
    assert!(dispatched.dispatched);
    assert_eq!(dispatched.display_status, "Dispatched");

    // Terminal: every further transition is rejected.
    for result in [
        admin_service::accept_shipment(&state, &admin, id).await,
        admin_service::request_payment(&state, &admin, id).await,
        admin_service::mark_ready(&state, &admin, id).await,
        admin_service::dispatch_shipment(&state, &admin, id).await,
    ] {
        assert!(matches!(result.unwrap_err(), AppError::InvalidTransition(_)));
    }

    // Owner still sees the shipment with the same derived label as the admin view.
    let own = shipment_service::get_shipment(&state, &customer, id)
        .await?
        .data
        .unwrap();
    assert_eq!(own.display_status, "Dispatched");

    let listed = shipment_service::list_shipments(
        &state,
        &customer,
        ShipmentListQuery {
            pagination: Pagination {
                page: Some(1),
                per_page: Some(20),
            },
            status: Some("Dispatched".into()),
            sort_order: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert!(listed.items.iter().any(|s| s.id == id));

    // One notification per successful transition: accept, price details,
    // invoice, request payment, payment, ready, dispatch.
    let feed = admin_service::list_notifications(
        &state,
        &admin,
        Pagination {
            page: Some(1),
            per_page: Some(50),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(feed.items.len(), 7);
    assert!(
        feed.items
            .iter()
            .all(|n| n.shipment_id == id && n.message.contains(&own.reference))
    );

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE notifications, shipments, audit_logs, products, categories, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}

async fn create_user(state: &AppState, role: &str, email: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        name: Set(None),
        phone: Set(None),
        address: Set(None),
        role: Set(role.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}

fn payment_form(proof: &str) -> PaymentForm {
    PaymentForm {
        payment_info: Some("Wire ref 88231".into()),
        remarks: None,
        approved_by: Some("ops-lead".into()),
        proof: proof.into(),
    }
}
