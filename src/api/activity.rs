//! Activity log endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::AppResult, models::activity::ActivityLogEntry};

use super::AuthenticatedUser;

#[derive(Deserialize, IntoParams)]
pub struct ActivityQuery {
    /// Maximum number of entries (default 100, capped at 500)
    pub limit: Option<i64>,
}

/// Recent activity log entries, newest first (admin only)
#[utoipa::path(
    get,
    path = "/activity",
    tag = "activity",
    security(("bearer_auth" = [])),
    params(ActivityQuery),
    responses(
        (status = 200, description = "Activity entries", body = Vec<ActivityLogEntry>),
        (status = 403, description = "Administrator rights required")
    )
)]
pub async fn list_activity(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<Vec<ActivityLogEntry>>> {
    claims.require_admin()?;

    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let entries = state.services.repository.activity.list_recent(limit).await?;
    Ok(Json(entries))
}
