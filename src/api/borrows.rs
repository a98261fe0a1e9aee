//! Borrow lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::{BorrowRequestDetails, CreateBorrowRequest, ReturnedItem},
        enums::BorrowStatus,
    },
};

use super::AuthenticatedUser;

/// Created borrow request response
#[derive(Serialize, ToSchema)]
pub struct CreateBorrowResponse {
    /// Borrow request ID
    pub id: i32,
    pub message: String,
}

/// Status change request
#[derive(Deserialize, ToSchema)]
pub struct ChangeStatusRequest {
    /// Target status: approved, rejected or returned
    pub status: String,
    /// Per-item quantities for a partial return
    pub returned_items: Option<Vec<ReturnedItem>>,
}

/// Generic acknowledgement
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Create a new borrow request
#[utoipa::path(
    post,
    path = "/borrows",
    tag = "borrows",
    security(("bearer_auth" = [])),
    request_body = CreateBorrowRequest,
    responses(
        (status = 201, description = "Borrow request created", body = CreateBorrowResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Requester or inventory item not found")
    )
)]
pub async fn create_borrow(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBorrowRequest>,
) -> AppResult<(StatusCode, Json<CreateBorrowResponse>)> {
    let id = state.services.borrows.create(&claims, &request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBorrowResponse {
            id,
            message: "Borrow request created".to_string(),
        }),
    ))
}

/// List borrow requests visible to the caller
#[utoipa::path(
    get,
    path = "/borrows",
    tag = "borrows",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Borrow requests", body = Vec<BorrowRequestDetails>)
    )
)]
pub async fn list_borrows(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowRequestDetails>>> {
    let requests = state.services.borrows.list(&claims).await?;
    Ok(Json(requests))
}

/// List pending borrow requests (admin only)
#[utoipa::path(
    get,
    path = "/borrows/pending",
    tag = "borrows",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending borrow requests", body = Vec<BorrowRequestDetails>),
        (status = 403, description = "Administrator rights required")
    )
)]
pub async fn list_pending(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowRequestDetails>>> {
    let requests = state.services.borrows.list_pending(&claims).await?;
    Ok(Json(requests))
}

/// Borrow history of one user
#[utoipa::path(
    get,
    path = "/borrows/user/{user_id}",
    tag = "borrows",
    security(("bearer_auth" = [])),
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User's borrow requests", body = Vec<BorrowRequestDetails>),
        (status = 403, description = "Not the user and not an administrator"),
        (status = 404, description = "User not found")
    )
)]
pub async fn user_history(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<BorrowRequestDetails>>> {
    let requests = state.services.borrows.history(&claims, user_id).await?;
    Ok(Json(requests))
}

/// Change the status of a borrow request (approve / reject / return)
#[utoipa::path(
    put,
    path = "/borrows/{id}/status",
    tag = "borrows",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Borrow request ID")
    ),
    request_body = ChangeStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = MessageResponse),
        (status = 400, description = "Unknown target status"),
        (status = 403, description = "Administrator rights required"),
        (status = 404, description = "Borrow request not found"),
        (status = 409, description = "Illegal transition or insufficient stock")
    )
)]
pub async fn change_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<ChangeStatusRequest>,
) -> AppResult<Json<MessageResponse>> {
    let new_status: BorrowStatus = request.status.parse()?;
    if new_status == BorrowStatus::Cancelled {
        // Cancellation has its own endpoint and permission rule
        return Err(AppError::Validation(
            "Use the cancel endpoint to cancel a borrow request".to_string(),
        ));
    }

    state
        .services
        .approvals
        .change_status(&claims, id, new_status, request.returned_items.as_deref())
        .await?;

    Ok(Json(MessageResponse {
        message: format!("Borrow request {} is now {}", id, new_status),
    }))
}

/// Cancel a pending borrow request (requester or admin)
#[utoipa::path(
    put,
    path = "/borrows/{id}/cancel",
    tag = "borrows",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Borrow request ID")
    ),
    responses(
        (status = 200, description = "Borrow request cancelled", body = MessageResponse),
        (status = 403, description = "Neither the requester nor an administrator"),
        (status = 404, description = "Borrow request not found"),
        (status = 409, description = "Request is not pending")
    )
)]
pub async fn cancel_borrow(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.approvals.cancel(&claims, id).await?;

    Ok(Json(MessageResponse {
        message: format!("Borrow request {} cancelled", id),
    }))
}
