//! Activity log repository (append-only)

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::AppResult,
    models::{activity::ActivityLogEntry, enums::ActionType},
};

#[derive(Clone)]
pub struct ActivityLogRepository {
    pool: Pool<Postgres>,
}

impl ActivityLogRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append one audit row inside the caller's transaction, so a rolled
    /// back transition leaves no orphan entry.
    pub async fn record(
        conn: &mut PgConnection,
        action: ActionType,
        borrow_request_id: Option<i32>,
        actor_id: i32,
        details: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_log (action_type, borrow_request_id, actor_id, details)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(i16::from(action))
        .bind(borrow_request_id)
        .bind(actor_id)
        .bind(details)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Append one audit row outside any transaction. Used for events that
    /// are not tied to a state mutation, such as denied access attempts.
    pub async fn record_standalone(
        &self,
        action: ActionType,
        borrow_request_id: Option<i32>,
        actor_id: i32,
        details: &str,
    ) -> AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        Self::record(&mut conn, action, borrow_request_id, actor_id, details).await
    }

    /// Most recent activity, newest first, joined with actor identity
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<ActivityLogEntry>> {
        let entries = sqlx::query_as::<_, ActivityLogEntry>(
            r#"
            SELECT a.id,
                   CASE a.action_type
                       WHEN 1 THEN 'approved'
                       WHEN 2 THEN 'rejected'
                       WHEN 3 THEN 'returned'
                       WHEN 4 THEN 'cancelled'
                       WHEN 5 THEN 'access_denied'
                       ELSE 'unknown'
                   END AS action_type,
                   a.borrow_request_id, a.actor_id,
                   u.display_name AS actor_name,
                   a.details, a.created_at
            FROM activity_log a
            LEFT JOIN users u ON u.id = a.actor_id
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    /// Count entries for one borrow request
    pub async fn count_for_request(&self, borrow_request_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM activity_log WHERE borrow_request_id = $1",
        )
        .bind(borrow_request_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
