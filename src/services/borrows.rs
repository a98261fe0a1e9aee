//! Borrow request service: creation and read projections

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::{BorrowRequestDetails, CreateBorrowRequest},
        user::UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new borrow request in status Pending.
    ///
    /// Validation happens up front, before any write. Stock is not touched;
    /// reservation happens on approval. Admins may create on behalf of
    /// another user, everyone else only for themselves.
    pub async fn create(
        &self,
        claims: &UserClaims,
        data: &CreateBorrowRequest,
    ) -> AppResult<i32> {
        validate_create(data)?;

        let requester_id = match data.requester_id {
            Some(id) if id != claims.sub => {
                claims.require_admin()?;
                id
            }
            Some(id) => id,
            None => claims.sub,
        };

        // Verify requester exists
        self.repository.users.get_by_id(requester_id).await?;

        self.repository.borrows.create(requester_id, data).await
    }

    /// Borrow requests visible to the caller: all of them for admins, own
    /// requests otherwise
    pub async fn list(&self, claims: &UserClaims) -> AppResult<Vec<BorrowRequestDetails>> {
        if claims.is_admin() {
            self.repository.borrows.list_all().await
        } else {
            self.repository.borrows.list_for_requester(claims.sub).await
        }
    }

    /// Pending requests awaiting a decision (admin only)
    pub async fn list_pending(&self, claims: &UserClaims) -> AppResult<Vec<BorrowRequestDetails>> {
        claims.require_admin()?;
        self.repository.borrows.list_pending().await
    }

    /// Borrow history of one user (the user themself, or an admin)
    pub async fn history(
        &self,
        claims: &UserClaims,
        user_id: i32,
    ) -> AppResult<Vec<BorrowRequestDetails>> {
        if claims.sub != user_id {
            claims.require_admin()?;
        }
        self.repository.users.get_by_id(user_id).await?;
        self.repository.borrows.list_for_requester(user_id).await
    }
}

/// Shape validation of a create payload, rejected before any write
fn validate_create(data: &CreateBorrowRequest) -> AppResult<()> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if data.return_date < data.borrow_date {
        return Err(AppError::Validation(format!(
            "Return date {} is before borrow date {}",
            data.return_date, data.borrow_date
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::borrow::CreateLineItem;
    use chrono::NaiveDate;

    fn payload() -> CreateBorrowRequest {
        CreateBorrowRequest {
            requester_id: None,
            borrow_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2026, 9, 5).unwrap(),
            purpose: "Team offsite".to_string(),
            items: vec![CreateLineItem {
                item_id: 1,
                quantity: 2,
                remark: None,
            }],
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(validate_create(&payload()).is_ok());
    }

    #[test]
    fn empty_items_rejected() {
        let mut data = payload();
        data.items.clear();
        assert!(matches!(validate_create(&data), Err(AppError::Validation(_))));
    }

    #[test]
    fn empty_purpose_rejected() {
        let mut data = payload();
        data.purpose.clear();
        assert!(matches!(validate_create(&data), Err(AppError::Validation(_))));
    }

    #[test]
    fn non_positive_quantity_rejected() {
        let mut data = payload();
        data.items[0].quantity = 0;
        assert!(matches!(validate_create(&data), Err(AppError::Validation(_))));
    }

    #[test]
    fn return_before_borrow_rejected() {
        let mut data = payload();
        data.return_date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert!(matches!(validate_create(&data), Err(AppError::Validation(_))));
    }
}
