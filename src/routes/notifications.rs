//! Notification routes
//!
//! Endpoints for in-app notifications: list, unread count, mark read.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::UnreadCountResponse;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize, Default)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: Option<bool>,
}

/// GET /notifications
///
/// Newest first.
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NotificationQuery>,
) -> impl IntoResponse {
    let unread_only = query.unread_only.unwrap_or(false);
    DataResponse::new(state.directory.notifications(unread_only))
}

/// GET /notifications/unread-count
pub async fn unread_count(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    DataResponse::new(UnreadCountResponse {
        count: state.directory.unread_count(),
    })
}

/// POST /notifications/:notification_id/read
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(notification_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let notification = state
        .directory
        .mark_read(&notification_id)
        .ok_or_else(|| ApiError::not_found("Notification not found"))?;
    Ok(DataResponse::new(notification))
}
