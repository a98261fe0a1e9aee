//! Borrow request repository: creation and the lifecycle transition

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};

use super::{activity::ActivityLogRepository, inventory::InventoryLedger};
use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::{BorrowLineItem, BorrowRequestDetails, BorrowRequestRow, CreateBorrowRequest, ReturnedItem},
        enums::{ActionType, BorrowStatus},
    },
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get borrow request header by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BorrowRequestRow> {
        sqlx::query_as::<_, BorrowRequestRow>("SELECT * FROM borrow_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow request {} not found", id)))
    }

    /// Create a borrow request header plus its line items as one
    /// transaction. If any line item fails (unknown inventory item), the
    /// header insert rolls back with it; no partial request can exist.
    ///
    /// No stock is touched here: stock is reserved on approval, not on
    /// request.
    pub async fn create(&self, requester_id: i32, data: &CreateBorrowRequest) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let borrow_request_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO borrow_requests (requester_id, borrow_date, return_date, purpose, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(requester_id)
        .bind(data.borrow_date)
        .bind(data.return_date)
        .bind(&data.purpose)
        .bind(i16::from(BorrowStatus::Pending))
        .fetch_one(&mut *tx)
        .await?;

        for line in &data.items {
            // Snapshot the item name at request time; a missing item aborts
            // the whole creation.
            let item_name: Option<String> =
                sqlx::query_scalar("SELECT name FROM inventory_items WHERE id = $1")
                    .bind(line.item_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            let item_name = item_name.ok_or_else(|| {
                AppError::NotFound(format!("Inventory item {} not found", line.item_id))
            })?;

            sqlx::query(
                r#"
                INSERT INTO borrow_line_items (borrow_request_id, item_id, item_name, quantity, remark)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(borrow_request_id)
            .bind(line.item_id)
            .bind(&item_name)
            .bind(line.quantity)
            .bind(&line.remark)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(borrow_request_id)
    }

    /// All borrow requests, newest first, with requester identity
    pub async fn list_all(&self) -> AppResult<Vec<BorrowRequestDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT b.*, u.display_name AS requester_name
            FROM borrow_requests b
            LEFT JOIN users u ON u.id = b.requester_id
            ORDER BY b.created_at DESC, b.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        self.hydrate(rows).await
    }

    /// Borrow requests of one requester, newest first
    pub async fn list_for_requester(&self, requester_id: i32) -> AppResult<Vec<BorrowRequestDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT b.*, u.display_name AS requester_name
            FROM borrow_requests b
            LEFT JOIN users u ON u.id = b.requester_id
            WHERE b.requester_id = $1
            ORDER BY b.created_at DESC, b.id DESC
            "#,
        )
        .bind(requester_id)
        .fetch_all(&self.pool)
        .await?;
        self.hydrate(rows).await
    }

    /// Pending borrow requests awaiting an admin decision, oldest first
    pub async fn list_pending(&self) -> AppResult<Vec<BorrowRequestDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT b.*, u.display_name AS requester_name
            FROM borrow_requests b
            LEFT JOIN users u ON u.id = b.requester_id
            WHERE b.status = $1
            ORDER BY b.created_at ASC, b.id ASC
            "#,
        )
        .bind(i16::from(BorrowStatus::Pending))
        .fetch_all(&self.pool)
        .await?;
        self.hydrate(rows).await
    }

    /// Attach line items to header rows
    async fn hydrate(&self, rows: Vec<sqlx::postgres::PgRow>) -> AppResult<Vec<BorrowRequestDetails>> {
        let ids: Vec<i32> = rows.iter().map(|r| r.get("id")).collect();
        let mut items_by_request = self.line_items_for(&ids).await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i32 = row.get("id");
            result.push(BorrowRequestDetails {
                id,
                requester_id: row.get("requester_id"),
                requester_name: row.get("requester_name"),
                borrow_date: row.get("borrow_date"),
                return_date: row.get("return_date"),
                actual_return_date: row.get("actual_return_date"),
                purpose: row.get("purpose"),
                status: BorrowStatus::try_from(row.get::<i16, _>("status"))?,
                created_at: row.get("created_at"),
                items: items_by_request.remove(&id).unwrap_or_default(),
            });
        }
        Ok(result)
    }

    async fn line_items_for(&self, request_ids: &[i32]) -> AppResult<HashMap<i32, Vec<BorrowLineItem>>> {
        if request_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let items = sqlx::query_as::<_, BorrowLineItem>(
            r#"
            SELECT * FROM borrow_line_items
            WHERE borrow_request_id = ANY($1)
            ORDER BY borrow_request_id, id
            "#,
        )
        .bind(request_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i32, Vec<BorrowLineItem>> = HashMap::new();
        for item in items {
            grouped.entry(item.borrow_request_id).or_default().push(item);
        }
        Ok(grouped)
    }

    /// Apply one lifecycle transition to a borrow request.
    ///
    /// Everything happens in a single transaction: the header row is read
    /// `FOR UPDATE` (so concurrent transitions of the same request have
    /// exactly one winner and the loser fails the state guard), stock is
    /// check-and-mutated per line item under row locks, the new status and
    /// the audit entry are written last. Any failure rolls the whole thing
    /// back; the caller never observes a partial transition.
    pub async fn transition(
        &self,
        id: i32,
        new_status: BorrowStatus,
        actor_id: i32,
        returned_items: Option<&[ReturnedItem]>,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BorrowRequestRow>(
            "SELECT * FROM borrow_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrow request {} not found", id)))?;

        let current = BorrowStatus::try_from(row.status)?;
        if !current.can_transition_to(new_status) {
            return Err(AppError::InvalidState(format!(
                "Borrow request {} is {}, cannot move to {}",
                id, current, new_status
            )));
        }

        // Ascending item_id keeps lock acquisition order consistent across
        // concurrent approvals, so they cannot deadlock on each other.
        let lines = sqlx::query_as::<_, BorrowLineItem>(
            "SELECT * FROM borrow_line_items WHERE borrow_request_id = $1 ORDER BY item_id",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        match new_status {
            BorrowStatus::Approved => {
                for line in &lines {
                    InventoryLedger::check_and_reserve(
                        &mut *tx,
                        line.item_id,
                        &line.item_name,
                        line.quantity,
                    )
                    .await?;
                }
            }
            BorrowStatus::Returned => {
                if let Some(returned) = returned_items {
                    for entry in returned {
                        if !lines.iter().any(|l| l.item_id == entry.item_id) {
                            return Err(AppError::Validation(format!(
                                "Item {} is not part of borrow request {}",
                                entry.item_id, id
                            )));
                        }
                    }
                }
                for line in &lines {
                    let quantity = returned_quantity(line, returned_items)?;
                    if quantity > 0 {
                        InventoryLedger::release(&mut *tx, line.item_id, &line.item_name, quantity)
                            .await?;
                    }
                }
            }
            BorrowStatus::Rejected | BorrowStatus::Cancelled => {}
            // Unreachable: the transition table has no edge back to Pending
            BorrowStatus::Pending => {
                return Err(AppError::InvalidState(
                    "Pending is not a transition target".to_string(),
                ));
            }
        }

        if new_status == BorrowStatus::Returned {
            sqlx::query(
                "UPDATE borrow_requests SET status = $2, actual_return_date = $3 WHERE id = $1",
            )
            .bind(id)
            .bind(i16::from(new_status))
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        } else {
            sqlx::query("UPDATE borrow_requests SET status = $2 WHERE id = $1")
                .bind(id)
                .bind(i16::from(new_status))
                .execute(&mut *tx)
                .await?;
        }

        let action = ActionType::for_transition(new_status).ok_or_else(|| {
            AppError::Internal(format!("No audit action for status {}", new_status))
        })?;
        let details = format!("Borrow request {}: {} -> {}", id, current, new_status);
        ActivityLogRepository::record(&mut *tx, action, Some(id), actor_id, &details).await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Resolve how many units of a line item a return puts back into stock.
///
/// With no explicit list the full borrowed quantity comes back. An explicit
/// list may return fewer units per item (or skip an item), never more than
/// was borrowed, and must not name items outside the request.
fn returned_quantity(line: &BorrowLineItem, returned: Option<&[ReturnedItem]>) -> AppResult<i32> {
    let Some(returned) = returned else {
        return Ok(line.quantity);
    };

    for entry in returned {
        if entry.item_id != line.item_id {
            continue;
        }
        if entry.quantity < 0 || entry.quantity > line.quantity {
            return Err(AppError::Validation(format!(
                "Returned quantity {} for '{}' must be between 0 and {}",
                entry.quantity, line.item_name, line.quantity
            )));
        }
        return Ok(entry.quantity);
    }
    // Item not listed: nothing comes back for it
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item_id: i32, quantity: i32) -> BorrowLineItem {
        BorrowLineItem {
            id: 1,
            borrow_request_id: 1,
            item_id,
            item_name: "Projector".to_string(),
            quantity,
            remark: None,
        }
    }

    #[test]
    fn full_return_by_default() {
        assert_eq!(returned_quantity(&line(1, 3), None).unwrap(), 3);
    }

    #[test]
    fn partial_return_is_capped_at_borrowed_quantity() {
        let returned = [ReturnedItem { item_id: 1, quantity: 2 }];
        assert_eq!(returned_quantity(&line(1, 3), Some(&returned)).unwrap(), 2);

        let over = [ReturnedItem { item_id: 1, quantity: 4 }];
        assert!(returned_quantity(&line(1, 3), Some(&over)).is_err());

        let negative = [ReturnedItem { item_id: 1, quantity: -1 }];
        assert!(returned_quantity(&line(1, 3), Some(&negative)).is_err());
    }

    #[test]
    fn unlisted_item_returns_nothing() {
        let returned = [ReturnedItem { item_id: 9, quantity: 1 }];
        assert_eq!(returned_quantity(&line(1, 3), Some(&returned)).unwrap(), 0);
    }
}
