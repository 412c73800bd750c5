//! Task routes
//!
//! Task listing, lookup and the status board.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::{resolve_now, AsOfQuery};
use crate::api::{ApiResponse, DataResponse, Paginated, PaginationParams};
use crate::app::AppState;
use crate::domain::catalog::parse_filter;
use crate::domain::tasks::{board, TaskFilter};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize, Default)]
pub struct TaskQueryParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
}

impl TaskQueryParams {
    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }

    fn filter(&self) -> ApiResult<TaskFilter> {
        Ok(TaskFilter {
            status: parse_filter(self.status.as_deref())?,
            branch: parse_filter(self.branch.as_deref())?,
            service_type: parse_filter(self.service.as_deref())?,
            client_id: self.client_id.clone().filter(|id| !id.trim().is_empty()),
        })
    }
}

/// GET /tasks
///
/// List tasks, optionally filtered by status, branch, service and client.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TaskQueryParams>,
) -> ApiResult<impl IntoResponse> {
    let filter = query.filter()?;
    let tasks = state.directory.tasks(&filter);
    Ok(Paginated::from_items(tasks, &query.pagination()))
}

/// GET /tasks/:task_id
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let task = state
        .directory
        .task(&task_id)
        .ok_or_else(|| ApiError::not_found("Task not found"))?;
    Ok(DataResponse::new(task))
}

/// GET /tasks/board
///
/// Tasks grouped into status columns, each flagged overdue against `as_of`.
pub async fn task_board(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<impl IntoResponse> {
    let now = resolve_now(query.as_of.as_deref())?;
    let tasks = state.directory.tasks(&TaskFilter::default());
    Ok(ApiResponse::with_meta(board(&tasks, now), json!({ "as_of": now })))
}
