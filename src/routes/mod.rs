pub mod catalog;
pub mod clients;
pub mod health;
pub mod notifications;
pub mod onboarding;
pub mod reports;
pub mod tasks;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/catalog", get(catalog::get_catalog))
        // Clients
        .route("/clients", get(clients::list_clients))
        .route("/clients/:client_id", get(clients::get_client))
        // Tasks
        .route("/tasks", get(tasks::list_tasks))
        .route("/tasks/board", get(tasks::task_board))
        .route("/tasks/:task_id", get(tasks::get_task))
        // Notifications
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/notifications/:notification_id/read",
            post(notifications::mark_read),
        )
        // Onboarding wizard
        .route("/onboarding", post(onboarding::open_session))
        .route(
            "/onboarding/:session_id",
            get(onboarding::get_session)
                .patch(onboarding::set_field)
                .delete(onboarding::abandon),
        )
        .route(
            "/onboarding/:session_id/services/toggle",
            post(onboarding::toggle_service),
        )
        .route(
            "/onboarding/:session_id/steps/:step/validation",
            get(onboarding::validate_step),
        )
        .route("/onboarding/:session_id/advance", post(onboarding::advance))
        .route("/onboarding/:session_id/back", post(onboarding::back))
        // Reports
        .route("/reports/dashboard", get(reports::dashboard))
        .route("/reports/branches", get(reports::tasks_by_branch))
        .route("/reports/status-buckets", get(reports::status_buckets))
        .route("/reports/services", get(reports::tasks_by_service))
        .route(
            "/reports/branch-performance",
            get(reports::branch_performance),
        )
}

/// `?as_of=` for endpoints that judge overdue work
#[derive(Debug, Deserialize, Default)]
pub struct AsOfQuery {
    /// RFC 3339 instant or a plain date (taken as 00:00 UTC); defaults to now
    #[serde(default)]
    pub as_of: Option<String>,
}

/// The instant to evaluate against: the supplied `as_of`, or the server clock.
pub fn resolve_now(as_of: Option<&str>) -> ApiResult<DateTime<Utc>> {
    let Some(raw) = as_of.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Utc::now());
    };

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| {
            ApiError::bad_request(format!(
                "as_of must be an RFC 3339 timestamp or YYYY-MM-DD date, got '{raw}'"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn as_of_accepts_timestamps_and_dates() {
        assert_eq!(
            resolve_now(Some("2024-01-01T10:00:00+05:30")).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 4, 30, 0).unwrap()
        );
        assert_eq!(
            resolve_now(Some("2024-01-01")).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn as_of_rejects_garbage() {
        assert!(matches!(
            resolve_now(Some("yesterday")),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn missing_as_of_uses_the_clock() {
        let before = Utc::now();
        let now = resolve_now(None).unwrap();
        assert!(now >= before);
    }
}
