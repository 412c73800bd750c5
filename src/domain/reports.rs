//! Dashboard aggregates
//!
//! Pure functions over client and task collections. Nothing is cached; every
//! call recomputes from its inputs, and "now" is always passed in.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::catalog::{Branch, ServiceType, TaskStatus};
use super::clients::Client;
use super::tasks::Task;

pub fn total_clients(clients: &[Client]) -> usize {
    clients.len()
}

/// Tasks that are neither Completed nor Filed.
pub fn pending_tasks(tasks: &[Task]) -> usize {
    tasks
        .iter()
        .filter(|t| !matches!(t.status, TaskStatus::Completed | TaskStatus::Filed))
        .count()
}

pub fn overdue_tasks(tasks: &[Task], now: DateTime<Utc>) -> usize {
    tasks.iter().filter(|t| t.is_overdue(now)).count()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchCount {
    pub branch: Branch,
    pub tasks: usize,
}

/// Open (not Completed) tasks per branch, one entry per branch in `branches` order.
pub fn tasks_by_branch(tasks: &[Task], branches: &[Branch]) -> Vec<BranchCount> {
    branches
        .iter()
        .map(|&branch| BranchCount {
            branch,
            tasks: tasks
                .iter()
                .filter(|t| t.branch == branch && t.status != TaskStatus::Completed)
                .count(),
        })
        .collect()
}

/// Dashboard status grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusBucket {
    Completed,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Pending Client")]
    PendingClient,
    Overdue,
}

impl StatusBucket {
    pub const ALL: &'static [StatusBucket] = &[
        Self::Completed,
        Self::InProgress,
        Self::PendingClient,
        Self::Overdue,
    ];

    /// Buckets overlap: an overdue task is also counted under its status bucket.
    pub fn contains(self, task: &Task, now: DateTime<Utc>) -> bool {
        match self {
            Self::Completed => matches!(task.status, TaskStatus::Completed | TaskStatus::Filed),
            Self::InProgress => matches!(task.status, TaskStatus::InProgress | TaskStatus::Review),
            Self::PendingClient => task.status == TaskStatus::PendingClient,
            Self::Overdue => task.is_overdue(now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub name: StatusBucket,
    pub value: usize,
}

pub fn tasks_by_status_bucket(tasks: &[Task], now: DateTime<Utc>) -> Vec<BucketCount> {
    StatusBucket::ALL
        .iter()
        .map(|&bucket| BucketCount {
            name: bucket,
            value: tasks.iter().filter(|t| bucket.contains(t, now)).count(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCount {
    pub service: ServiceType,
    pub tasks: usize,
}

/// Tasks per service type, in catalog order.
pub fn tasks_by_service(tasks: &[Task]) -> Vec<ServiceCount> {
    ServiceType::ALL
        .iter()
        .map(|&service| ServiceCount {
            service,
            tasks: tasks.iter().filter(|t| t.service_type == service).count(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchPerformance {
    pub branch: Branch,
    pub completed: usize,
    pub overdue: usize,
}

pub fn branch_performance(tasks: &[Task], now: DateTime<Utc>) -> Vec<BranchPerformance> {
    Branch::ALL
        .iter()
        .map(|&branch| {
            let at_branch = tasks.iter().filter(|t| t.branch == branch);
            let (completed, overdue) = at_branch.fold((0, 0), |(done, late), t| {
                (
                    done + usize::from(StatusBucket::Completed.contains(t, now)),
                    late + usize::from(t.is_overdue(now)),
                )
            });
            BranchPerformance {
                branch,
                completed,
                overdue,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub task_id: String,
    pub text: String,
    pub user: String,
    pub at: DateTime<Utc>,
}

/// Most recently updated tasks first.
pub fn recent_activity(tasks: &[Task], limit: usize) -> Vec<Activity> {
    let mut recent: Vec<&Task> = tasks.iter().collect();
    recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    recent
        .into_iter()
        .take(limit)
        .map(|t| Activity {
            task_id: t.id.clone(),
            text: format!("Updated {} to {}", t.title, t.status),
            user: t.assigned_to.clone(),
            at: t.updated_at,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_clients: usize,
    pub pending_tasks: usize,
    pub overdue_tasks: usize,
    pub tasks_by_branch: Vec<BranchCount>,
    pub status_buckets: Vec<BucketCount>,
    pub recent_activity: Vec<Activity>,
}

pub const RECENT_ACTIVITY_LIMIT: usize = 5;

pub fn dashboard(clients: &[Client], tasks: &[Task], now: DateTime<Utc>) -> DashboardSummary {
    DashboardSummary {
        total_clients: total_clients(clients),
        pending_tasks: pending_tasks(tasks),
        overdue_tasks: overdue_tasks(tasks, now),
        tasks_by_branch: tasks_by_branch(tasks, Branch::ALL),
        status_buckets: tasks_by_status_bucket(tasks, now),
        recent_activity: recent_activity(tasks, RECENT_ACTIVITY_LIMIT),
    }
}
