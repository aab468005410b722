use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth as auth_dto,
        categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        shipments::{
            CreateShipmentRequest, InvoiceForm, NotificationList, PaymentForm, PriceDetailsForm,
            ShipmentDetails, ShipmentList,
        },
    },
    models::{Category, Customer, Notification, Product, Shipment, User},
    response::{ApiResponse, Meta},
    routes::{admin, auth, categories, health, params, products, shipments},
    workflow::ShipmentStatus,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::me,
        auth::update_profile,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        shipments::create_shipment,
        shipments::list_shipments,
        shipments::get_shipment,
        admin::list_all_shipments,
        admin::get_shipment_admin,
        admin::accept_shipment,
        admin::save_price_details,
        admin::confirm_invoice,
        admin::request_payment,
        admin::save_payment,
        admin::mark_ready,
        admin::dispatch_shipment,
        admin::list_customers,
        admin::list_notifications
    ),
    components(
        schemas(
            User,
            Customer,
            Category,
            Product,
            Shipment,
            Notification,
            ShipmentStatus,
            ShipmentDetails,
            CreateShipmentRequest,
            PriceDetailsForm,
            InvoiceForm,
            PaymentForm,
            ShipmentList,
            NotificationList,
            CategoryList,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            ProductList,
            CreateProductRequest,
            UpdateProductRequest,
            auth_dto::RegisterRequest,
            auth_dto::LoginRequest,
            auth_dto::LoginResponse,
            auth_dto::UpdateProfileRequest,
            params::Pagination,
            params::ProductQuery,
            params::ShipmentListQuery,
            Meta,
            ApiResponse<Shipment>,
            ApiResponse<ShipmentList>,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Category>,
            ApiResponse<CategoryList>,
            ApiResponse<NotificationList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication and profile endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Shipments", description = "Customer shipment endpoints"),
        (name = "Admin", description = "Back-office shipment workflow and management"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
