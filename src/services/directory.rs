//! In-memory record directory
//!
//! Holds the client, task and notification collections the API reads from.
//! Callers get owned copies; the lock is never held outside these methods.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::seed::DemoData;
use crate::domain::{Client, ClientFilter, Notification, Task, TaskFilter};

#[derive(Debug, Default)]
struct Records {
    clients: Vec<Client>,
    tasks: Vec<Task>,
    notifications: Vec<Notification>,
}

/// Shared handle to the record collections
#[derive(Clone, Default)]
pub struct Directory {
    records: Arc<RwLock<Records>>,
}

/// Record counts, for health reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DirectoryCounts {
    pub clients: usize,
    pub tasks: usize,
    pub notifications: usize,
}

impl Directory {
    pub fn new(data: DemoData) -> Self {
        info!(
            clients = data.clients.len(),
            tasks = data.tasks.len(),
            notifications = data.notifications.len(),
            "Directory loaded"
        );
        Self {
            records: Arc::new(RwLock::new(Records {
                clients: data.clients,
                tasks: data.tasks,
                notifications: data.notifications,
            })),
        }
    }

    pub fn clients(&self, filter: &ClientFilter) -> Vec<Client> {
        self.records
            .read()
            .clients
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect()
    }

    pub fn client(&self, id: &str) -> Option<Client> {
        self.records.read().clients.iter().find(|c| c.id == id).cloned()
    }

    pub fn insert_client(&self, client: Client) {
        debug!(client_id = %client.id, branch = %client.branch, "Client inserted");
        self.records.write().clients.push(client);
    }

    pub fn tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        self.records
            .read()
            .tasks
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    pub fn task(&self, id: &str) -> Option<Task> {
        self.records.read().tasks.iter().find(|t| t.id == id).cloned()
    }

    /// Newest first.
    pub fn notifications(&self, unread_only: bool) -> Vec<Notification> {
        self.records
            .read()
            .notifications
            .iter()
            .filter(|n| !unread_only || !n.read)
            .cloned()
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.records
            .read()
            .notifications
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    /// Mark one notification read. Marking an already-read notification is a no-op.
    pub fn mark_read(&self, id: &str) -> Option<Notification> {
        let mut records = self.records.write();
        let notification = records.notifications.iter_mut().find(|n| n.id == id)?;
        if !notification.read {
            notification.read = true;
            info!(notification_id = %id, "Notification marked read");
        }
        Some(notification.clone())
    }

    pub fn push_notification(&self, notification: Notification) {
        self.records.write().notifications.insert(0, notification);
    }

    /// Consistent copy of clients and tasks for aggregate reporting.
    pub fn snapshot(&self) -> (Vec<Client>, Vec<Task>) {
        let records = self.records.read();
        (records.clients.clone(), records.tasks.clone())
    }

    pub fn counts(&self) -> DirectoryCounts {
        let records = self.records.read();
        DirectoryCounts {
            clients: records.clients.len(),
            tasks: records.tasks.len(),
            notifications: records.notifications.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Branch, TaskStatus};
    use crate::services::seed::demo_data;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn directory() -> Directory {
        Directory::new(demo_data(Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()))
    }

    #[test]
    fn client_filter_by_branch() {
        let dir = directory();
        let filter = ClientFilter {
            branch: Some(Branch::Ravulapalem),
            ..Default::default()
        };
        let names: Vec<_> = dir.clients(&filter).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Srinivasa Traders", "Venkateswara Motors"]);
    }

    #[test]
    fn client_lookup() {
        let dir = directory();
        assert_eq!(dir.client("c3").map(|c| c.name), Some("Godavari Exports".to_string()));
        assert!(dir.client("c99").is_none());
    }

    #[test]
    fn task_filter_by_client_and_status() {
        let dir = directory();
        let filter = TaskFilter {
            client_id: Some("c2".into()),
            ..Default::default()
        };
        let tasks = dir.tasks(&filter);
        assert_eq!(tasks.len(), 7);
        assert!(tasks.iter().all(|t| t.client_name == "Krishna Tech Solutions"));

        let completed = dir.tasks(&TaskFilter {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        });
        assert!(completed.iter().all(|t| t.status == TaskStatus::Completed));
    }

    #[test]
    fn mark_read_is_idempotent() {
        let dir = directory();
        assert_eq!(dir.unread_count(), 2);

        assert!(dir.mark_read("n1").unwrap().read);
        assert!(dir.mark_read("n1").unwrap().read);
        assert_eq!(dir.unread_count(), 1);
        assert_eq!(dir.notifications(true).len(), 1);
        assert!(dir.mark_read("missing").is_none());
    }

    #[test]
    fn inserted_client_is_visible() {
        let dir = Directory::default();
        let mut client = demo_data(Utc::now()).clients.remove(0);
        client.id = "new".into();
        dir.insert_client(client);

        assert_eq!(dir.counts().clients, 1);
        assert!(dir.client("new").is_some());
    }
}
