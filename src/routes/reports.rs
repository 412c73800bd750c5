//! Report routes
//!
//! Every report is recomputed from the directory on each request. The clock is
//! read here, once, and handed to the aggregate functions.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;

use super::{resolve_now, AsOfQuery};
use crate::api::ApiResponse;
use crate::app::AppState;
use crate::domain::reports;
use crate::domain::Branch;
use crate::error::ApiResult;

fn report<T: serde::Serialize>(data: T, now: DateTime<Utc>) -> ApiResponse<T> {
    ApiResponse::with_meta(data, json!({ "as_of": now }))
}

/// GET /reports/dashboard
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<impl IntoResponse> {
    let now = resolve_now(query.as_of.as_deref())?;
    let (clients, tasks) = state.directory.snapshot();
    Ok(report(reports::dashboard(&clients, &tasks, now), now))
}

/// GET /reports/branches
///
/// Open tasks per branch.
pub async fn tasks_by_branch(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<impl IntoResponse> {
    let now = resolve_now(query.as_of.as_deref())?;
    let (_, tasks) = state.directory.snapshot();
    Ok(report(reports::tasks_by_branch(&tasks, Branch::ALL), now))
}

/// GET /reports/status-buckets
///
/// Buckets overlap: overdue tasks are also counted under their status.
pub async fn status_buckets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<impl IntoResponse> {
    let now = resolve_now(query.as_of.as_deref())?;
    let (_, tasks) = state.directory.snapshot();
    Ok(report(reports::tasks_by_status_bucket(&tasks, now), now))
}

/// GET /reports/services
pub async fn tasks_by_service(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<impl IntoResponse> {
    let now = resolve_now(query.as_of.as_deref())?;
    let (_, tasks) = state.directory.snapshot();
    Ok(report(reports::tasks_by_service(&tasks), now))
}

/// GET /reports/branch-performance
pub async fn branch_performance(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<impl IntoResponse> {
    let now = resolve_now(query.as_of.as_deref())?;
    let (_, tasks) = state.directory.snapshot();
    Ok(report(reports::branch_performance(&tasks, now), now))
}
