//! Task domain types
//!
//! Compliance work items tied to a client.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{Branch, Priority, ServiceType, TaskStatus};

/// Task entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub client_id: String,
    /// Denormalized from the owning client
    pub client_name: String,
    pub branch: Branch,
    pub service_type: ServiceType,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_date: NaiveDate,
    pub assigned_to: String,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Start of the due date (00:00 UTC).
    pub fn due_at(&self) -> DateTime<Utc> {
        self.due_date.and_time(NaiveTime::MIN).and_utc()
    }

    /// Overdue iff the due date has begun before `now` and the task is not Completed.
    ///
    /// Filed tasks still count as overdue.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_at() < now && self.status != TaskStatus::Completed
    }
}

/// Task list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub branch: Option<Branch>,
    pub service_type: Option<ServiceType>,
    pub client_id: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |s| task.status == s)
            && self.branch.map_or(true, |b| task.branch == b)
            && self.service_type.map_or(true, |s| task.service_type == s)
            && self
                .client_id
                .as_deref()
                .map_or(true, |id| task.client_id == id)
    }
}

/// Status columns shown on the task board. Filed has no column of its own.
pub const BOARD_COLUMNS: &[TaskStatus] = &[
    TaskStatus::New,
    TaskStatus::InProgress,
    TaskStatus::PendingClient,
    TaskStatus::Review,
    TaskStatus::Completed,
];

/// Task as rendered on the board
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCard {
    #[serde(flatten)]
    pub task: Task,
    pub overdue: bool,
}

/// One board column
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub count: usize,
    pub tasks: Vec<BoardCard>,
}

/// Group tasks into the board columns, flagging overdue cards against `now`.
pub fn board(tasks: &[Task], now: DateTime<Utc>) -> Vec<BoardColumn> {
    BOARD_COLUMNS
        .iter()
        .map(|&status| {
            let cards: Vec<BoardCard> = tasks
                .iter()
                .filter(|t| t.status == status)
                .map(|t| BoardCard {
                    task: t.clone(),
                    overdue: t.is_overdue(now),
                })
                .collect();
            BoardColumn {
                status,
                count: cards.len(),
                tasks: cards,
            }
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::{at, date, task};
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    #[test]
    fn past_due_open_task_is_overdue() {
        let t = task("t1", Branch::Amalapuram, TaskStatus::New, date(2020, 1, 1));
        assert!(t.is_overdue(at(2024, 1, 1)));
    }

    #[test]
    fn completed_task_is_never_overdue() {
        let t = task("t1", Branch::Amalapuram, TaskStatus::Completed, date(2020, 1, 1));
        assert!(!t.is_overdue(at(2024, 1, 1)));
    }

    #[test]
    fn filed_task_can_still_be_overdue() {
        let t = task("t1", Branch::Amalapuram, TaskStatus::Filed, date(2020, 1, 1));
        assert!(t.is_overdue(at(2024, 1, 1)));
    }

    #[test]
    fn due_today_becomes_overdue_once_the_day_starts() {
        let t = task("t1", Branch::Amalapuram, TaskStatus::New, date(2024, 1, 1));
        assert!(!t.is_overdue(at(2024, 1, 1)));
        assert!(t.is_overdue(at(2024, 1, 1) + Duration::hours(9)));
    }

    #[test]
    fn filter_combines_all_criteria() {
        let t = task("t1", Branch::Versatile, TaskStatus::Review, date(2024, 1, 1));
        let filter = TaskFilter {
            status: Some(TaskStatus::Review),
            branch: Some(Branch::Versatile),
            service_type: Some(ServiceType::Gst),
            client_id: Some("c1".into()),
        };
        assert!(filter.matches(&t));

        let other_client = TaskFilter {
            client_id: Some("c2".into()),
            ..filter
        };
        assert!(!other_client.matches(&t));
    }

    #[test]
    fn board_skips_filed_and_keeps_column_order() {
        let tasks = vec![
            task("t1", Branch::Versatile, TaskStatus::Filed, date(2024, 1, 1)),
            task("t2", Branch::Versatile, TaskStatus::Review, date(2020, 1, 1)),
        ];
        let columns = board(&tasks, at(2024, 1, 1));

        let statuses: Vec<_> = columns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, BOARD_COLUMNS.to_vec());
        assert_eq!(columns.iter().map(|c| c.count).sum::<usize>(), 1);

        let review = &columns[3];
        assert_eq!(review.tasks[0].task.id, "t2");
        assert!(review.tasks[0].overdue);
    }
}
