//! Borrow request model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::BorrowStatus;

/// Borrow request header as stored in the database.
///
/// `status` stays in its raw SMALLINT form here; callers decode it through
/// `BorrowStatus::try_from` so a corrupt row surfaces as an error instead of
/// a silent default.
#[derive(Debug, Clone, FromRow)]
pub struct BorrowRequestRow {
    pub id: i32,
    pub requester_id: i32,
    pub borrow_date: NaiveDate,
    pub return_date: NaiveDate,
    pub actual_return_date: Option<DateTime<Utc>>,
    pub purpose: String,
    pub status: i16,
    pub created_at: DateTime<Utc>,
}

/// A single line of a borrow request
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowLineItem {
    pub id: i32,
    pub borrow_request_id: i32,
    pub item_id: i32,
    /// Snapshot of the inventory item's name at request time
    pub item_name: String,
    pub quantity: i32,
    pub remark: Option<String>,
}

/// Borrow request with nested line items, as served by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowRequestDetails {
    pub id: i32,
    pub requester_id: i32,
    /// Requester display name, joined for admin views
    pub requester_name: Option<String>,
    pub borrow_date: NaiveDate,
    pub return_date: NaiveDate,
    pub actual_return_date: Option<DateTime<Utc>>,
    pub purpose: String,
    pub status: BorrowStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<BorrowLineItem>,
}

/// One requested line in a create call
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateLineItem {
    pub item_id: i32,
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: i32,
    pub remark: Option<String>,
}

/// Create borrow request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBorrowRequest {
    /// Defaults to the caller; admins may create on behalf of another user
    pub requester_id: Option<i32>,
    pub borrow_date: NaiveDate,
    pub return_date: NaiveDate,
    #[validate(length(min = 1, message = "purpose is required"))]
    pub purpose: String,
    #[validate(length(min = 1, message = "at least one line item is required"), nested)]
    pub items: Vec<CreateLineItem>,
}

/// Per-item returned quantity for a partial return
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReturnedItem {
    pub item_id: i32,
    pub quantity: i32,
}
