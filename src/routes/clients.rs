//! Client directory routes

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::{DataResponse, Paginated, PaginationParams};
use crate::app::AppState;
use crate::domain::catalog::parse_filter;
use crate::domain::ClientFilter;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize, Default)]
pub struct ClientQueryParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    /// Matched against name and PAN, case-insensitively
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

/// GET /clients
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClientQueryParams>,
) -> ApiResult<impl IntoResponse> {
    let filter = ClientFilter {
        search: query.search.clone(),
        branch: parse_filter(query.branch.as_deref())?,
    };
    let pagination = PaginationParams {
        page: query.page,
        per_page: query.per_page,
    };

    let clients = state.directory.clients(&filter);
    Ok(Paginated::from_items(clients, &pagination))
}

/// GET /clients/:client_id
pub async fn get_client(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let client = state
        .directory
        .client(&client_id)
        .ok_or_else(|| ApiError::not_found("Client not found"))?;
    Ok(DataResponse::new(client))
}
