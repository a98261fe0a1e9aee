//! Inventory item model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Fungible stock pool for one kind of equipment.
///
/// Invariant: `0 <= available_quantity <= total_quantity`, maintained by the
/// approval transaction and backed by CHECK constraints in the schema.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InventoryItem {
    pub id: i32,
    pub name: String,
    pub available_quantity: i32,
    pub total_quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// Create inventory item payload (admin master data)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInventoryItem {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "total_quantity must not be negative"))]
    pub total_quantity: i32,
}
