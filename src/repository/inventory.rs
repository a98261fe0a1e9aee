//! Inventory ledger: the only reader/writer of `available_quantity`

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::inventory::{CreateInventoryItem, InventoryItem},
};

#[derive(Clone)]
pub struct InventoryLedger {
    pool: Pool<Postgres>,
}

impl InventoryLedger {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all inventory items
    pub async fn list(&self) -> AppResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory_items ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Get inventory item by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<InventoryItem> {
        sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inventory item {} not found", id)))
    }

    /// Create an inventory item; the pool starts full
    pub async fn create(&self, data: &CreateInventoryItem) -> AppResult<InventoryItem> {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO inventory_items (name, available_quantity, total_quantity)
            VALUES ($1, $2, $2)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.total_quantity)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    /// Atomically check and decrement available stock for one item, inside
    /// the caller's transaction.
    ///
    /// Locks the item row (`SELECT ... FOR UPDATE`) before reading the
    /// quantity, so two concurrent approvals competing for the same stock
    /// serialize here and the second one sees the decremented value. Fails
    /// with `InsufficientStockError` when the pool cannot cover the request;
    /// the caller is expected to roll the whole transaction back.
    pub async fn check_and_reserve(
        conn: &mut PgConnection,
        item_id: i32,
        item_name: &str,
        quantity: i32,
    ) -> AppResult<()> {
        let available: Option<i32> = sqlx::query_scalar(
            "SELECT available_quantity FROM inventory_items WHERE id = $1 FOR UPDATE",
        )
        .bind(item_id)
        .fetch_optional(&mut *conn)
        .await?;

        let available = available
            .ok_or_else(|| AppError::NotFound(format!("Inventory item {} not found", item_id)))?;

        if available < quantity {
            return Err(AppError::InsufficientStock {
                item_name: item_name.to_string(),
                requested: quantity,
                available,
            });
        }

        sqlx::query(
            "UPDATE inventory_items SET available_quantity = available_quantity - $2 WHERE id = $1",
        )
        .bind(item_id)
        .bind(quantity)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Return stock to the pool, inside the caller's transaction.
    ///
    /// Locks the item row and refuses to push `available_quantity` past
    /// `total_quantity`. The state machine already blocks double returns, so
    /// tripping this bound means the ledger is corrupt and the transaction
    /// must not commit.
    pub async fn release(
        conn: &mut PgConnection,
        item_id: i32,
        item_name: &str,
        quantity: i32,
    ) -> AppResult<()> {
        let row: Option<(i32, i32)> = sqlx::query_as(
            "SELECT available_quantity, total_quantity FROM inventory_items WHERE id = $1 FOR UPDATE",
        )
        .bind(item_id)
        .fetch_optional(&mut *conn)
        .await?;

        let (available, total) = row
            .ok_or_else(|| AppError::NotFound(format!("Inventory item {} not found", item_id)))?;

        if available + quantity > total {
            return Err(AppError::Internal(format!(
                "Returning {} of '{}' would exceed total stock ({} + {} > {})",
                quantity, item_name, available, quantity, total
            )));
        }

        sqlx::query(
            "UPDATE inventory_items SET available_quantity = available_quantity + $2 WHERE id = $1",
        )
        .bind(item_id)
        .bind(quantity)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
