//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{activity, auth, borrows, health, inventory};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Eqborrow API",
        version = "0.1.0",
        description = "Equipment Borrow/Return Tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Borrows
        borrows::create_borrow,
        borrows::list_borrows,
        borrows::list_pending,
        borrows::user_history,
        borrows::change_status,
        borrows::cancel_borrow,
        // Inventory
        inventory::list_items,
        inventory::create_item,
        // Activity
        activity::list_activity,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::user::UserInfo,
            crate::models::user::Role,
            // Borrows
            crate::models::borrow::CreateBorrowRequest,
            crate::models::borrow::CreateLineItem,
            crate::models::borrow::BorrowRequestDetails,
            crate::models::borrow::BorrowLineItem,
            crate::models::borrow::ReturnedItem,
            crate::models::enums::BorrowStatus,
            crate::models::enums::ActionType,
            borrows::CreateBorrowResponse,
            borrows::ChangeStatusRequest,
            borrows::MessageResponse,
            // Inventory
            crate::models::inventory::InventoryItem,
            crate::models::inventory::CreateInventoryItem,
            // Activity
            crate::models::activity::ActivityLogEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "borrows", description = "Borrow request lifecycle"),
        (name = "inventory", description = "Equipment inventory"),
        (name = "activity", description = "Audit trail")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
