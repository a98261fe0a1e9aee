//! Approval service: the single driver of borrow lifecycle transitions

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::ReturnedItem,
        enums::{ActionType, BorrowStatus},
        user::UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ApprovalsService {
    repository: Repository,
}

impl ApprovalsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Transition a borrow request to `new_status`.
    ///
    /// Approve, reject and return are admin operations; cancel is open to
    /// the original requester as well. Permission failures are raised (and
    /// audited as access-denied) before any mutation; the state guard and
    /// the stock arithmetic run inside the repository transaction.
    pub async fn change_status(
        &self,
        claims: &UserClaims,
        borrow_request_id: i32,
        new_status: BorrowStatus,
        returned_items: Option<&[ReturnedItem]>,
    ) -> AppResult<()> {
        match new_status {
            BorrowStatus::Pending => {
                return Err(AppError::Validation(
                    "A borrow request cannot be moved back to pending".to_string(),
                ));
            }
            BorrowStatus::Approved | BorrowStatus::Rejected | BorrowStatus::Returned => {
                if let Err(e) = claims.require_admin() {
                    self.audit_denied(claims, borrow_request_id, new_status).await;
                    return Err(e);
                }
            }
            BorrowStatus::Cancelled => {
                let request = self.repository.borrows.get_by_id(borrow_request_id).await?;
                if !claims.is_admin() && claims.sub != request.requester_id {
                    self.audit_denied(claims, borrow_request_id, new_status).await;
                    return Err(AppError::Permission(
                        "Only the requester or an administrator may cancel".to_string(),
                    ));
                }
            }
        }

        if returned_items.is_some() && new_status != BorrowStatus::Returned {
            return Err(AppError::Validation(
                "Returned item quantities only apply to the return transition".to_string(),
            ));
        }

        self.repository
            .borrows
            .transition(borrow_request_id, new_status, claims.sub, returned_items)
            .await?;

        tracing::info!(
            borrow_request_id,
            actor = claims.sub,
            status = %new_status,
            "Borrow request transitioned"
        );
        Ok(())
    }

    /// Cancel a Pending borrow request (requester or admin)
    pub async fn cancel(&self, claims: &UserClaims, borrow_request_id: i32) -> AppResult<()> {
        self.change_status(claims, borrow_request_id, BorrowStatus::Cancelled, None)
            .await
    }

    /// Best-effort audit of a denied attempt; the denial itself is not a
    /// state mutation, so a logging failure must not mask the 403.
    async fn audit_denied(&self, claims: &UserClaims, borrow_request_id: i32, target: BorrowStatus) {
        let details = format!(
            "User {} denied transition of borrow request {} to {}",
            claims.username, borrow_request_id, target
        );
        if let Err(e) = self
            .repository
            .activity
            .record_standalone(
                ActionType::AccessDenied,
                Some(borrow_request_id),
                claims.sub,
                &details,
            )
            .await
        {
            tracing::warn!("Failed to record access-denied audit entry: {}", e);
        }
    }
}
