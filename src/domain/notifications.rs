//! Notification domain types
//!
//! Read-only informational alerts shown to staff.

use serde::{Deserialize, Serialize};

use super::catalog::NotificationKind;

/// Notification entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Relative time label, e.g. "2 hrs ago"
    pub time: String,
    pub read: bool,
}

/// Unread count response
#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub count: usize,
}
