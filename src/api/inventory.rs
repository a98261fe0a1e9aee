//! Inventory endpoints (the minimal master data the core needs)

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::inventory::{CreateInventoryItem, InventoryItem},
};

use super::AuthenticatedUser;

/// List all inventory items with current stock
#[utoipa::path(
    get,
    path = "/items",
    tag = "inventory",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Inventory items", body = Vec<InventoryItem>)
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<InventoryItem>>> {
    let items = state.services.repository.inventory.list().await?;
    Ok(Json(items))
}

/// Create an inventory item (admin only)
#[utoipa::path(
    post,
    path = "/items",
    tag = "inventory",
    security(("bearer_auth" = [])),
    request_body = CreateInventoryItem,
    responses(
        (status = 201, description = "Item created", body = InventoryItem),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Administrator rights required")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateInventoryItem>,
) -> AppResult<(StatusCode, Json<InventoryItem>)> {
    claims.require_admin()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = state.services.repository.inventory.create(&request).await?;
    Ok((StatusCode::CREATED, Json(item)))
}
