//! Activity log model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Activity entry joined with actor identity for display.
///
/// Rows are append-only: one per status transition (plus access-denied
/// events), never updated or deleted.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ActivityLogEntry {
    pub id: i64,
    pub action_type: String,
    pub borrow_request_id: Option<i32>,
    pub actor_id: i32,
    pub actor_name: Option<String>,
    pub details: String,
    pub created_at: DateTime<Utc>,
}
