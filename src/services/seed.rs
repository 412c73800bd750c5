//! Demo records
//!
//! A fixed set of clients, tasks and notifications for local development and
//! demos. Task dates are laid out relative to the supplied clock so the board
//! always shows a mix of upcoming and overdue work.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    Branch, Client, ClientStatus, Notification, NotificationKind, Priority, ServiceType, Task,
    TaskStatus,
};

/// Seed collections
#[derive(Debug, Clone, Default)]
pub struct DemoData {
    pub clients: Vec<Client>,
    pub tasks: Vec<Task>,
    pub notifications: Vec<Notification>,
}

const TASK_COUNT: usize = 35;

const SERVICE_ROTATION: &[ServiceType] = &[
    ServiceType::Gst,
    ServiceType::IncomeTax,
    ServiceType::Tds,
    ServiceType::TaxAudit,
    ServiceType::Roc,
];

const STAFF: &[&str] = &["Anil Kumar", "Priya S", "Rajesh V", "Sneha M", "Partner"];

pub fn demo_clients() -> Vec<Client> {
    vec![
        Client {
            id: "c1".to_string(),
            name: "Srinivasa Traders".to_string(),
            pan: "ABCDE1234F".to_string(),
            gstin: Some("37ABCDE1234F1Z5".to_string()),
            branch: Branch::Ravulapalem,
            contact_person: "Ravi Kumar".to_string(),
            phone: "9876543210".to_string(),
            email: "ravi@srinivasa.com".to_string(),
            status: ClientStatus::Active,
        },
        Client {
            id: "c2".to_string(),
            name: "Krishna Tech Solutions".to_string(),
            pan: "FGHIJ5678K".to_string(),
            gstin: None,
            branch: Branch::Versatile,
            contact_person: "Krishna M".to_string(),
            phone: "9988776655".to_string(),
            email: "info@krishnatech.in".to_string(),
            status: ClientStatus::Active,
        },
        Client {
            id: "c3".to_string(),
            name: "Godavari Exports".to_string(),
            pan: "KLMNO9012P".to_string(),
            gstin: Some("37KLMNO9012P1Z9".to_string()),
            branch: Branch::Amalapuram,
            contact_person: "Suresh Reddy".to_string(),
            phone: "9123456789".to_string(),
            email: "suresh@godavari.ex".to_string(),
            status: ClientStatus::Active,
        },
        Client {
            id: "c4".to_string(),
            name: "Atreya Foods".to_string(),
            pan: "PQRST3456U".to_string(),
            gstin: None,
            branch: Branch::Atreyapuram,
            contact_person: "Lakshmi N".to_string(),
            phone: "9000011111".to_string(),
            email: "accounts@atreyafoods.com".to_string(),
            status: ClientStatus::Active,
        },
        Client {
            id: "c5".to_string(),
            name: "Venkateswara Motors".to_string(),
            pan: "VWXYZ7890A".to_string(),
            gstin: Some("37VWXYZ7890A1Z2".to_string()),
            branch: Branch::Ravulapalem,
            contact_person: "Venkatesh".to_string(),
            phone: "8888899999".to_string(),
            email: "venky@vmotors.com".to_string(),
            status: ClientStatus::Inactive,
        },
    ]
}

/// Days from `now` until task `i` is due. Every third task is up to four days late.
fn due_offset_days(i: usize) -> i64 {
    if i % 3 == 0 {
        -((i % 5) as i64)
    } else {
        ((i * 7) % 20) as i64
    }
}

pub fn demo_tasks(clients: &[Client], now: DateTime<Utc>) -> Vec<Task> {
    if clients.is_empty() {
        return Vec::new();
    }

    (0..TASK_COUNT)
        .map(|i| {
            let client = &clients[i % clients.len()];
            let service = SERVICE_ROTATION[i % SERVICE_ROTATION.len()];
            Task {
                id: format!("t{:02}", i + 1),
                client_id: client.id.clone(),
                client_name: client.name.clone(),
                branch: client.branch,
                service_type: service,
                title: format!("{} Filing - {}", service, client.name),
                status: TaskStatus::ALL[(i * 5 + 1) % TaskStatus::ALL.len()],
                priority: Priority::ALL[(i * 2 + i / 4) % Priority::ALL.len()],
                due_date: (now + Duration::days(due_offset_days(i))).date_naive(),
                assigned_to: STAFF[(i * 3 + 1) % STAFF.len()].to_string(),
                updated_at: now - Duration::minutes((i * 17) as i64),
            }
        })
        .collect()
}

pub fn demo_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "n1".to_string(),
            title: "GST Deadline Approaching".to_string(),
            message: "GSTR-3B due date is in 3 days.".to_string(),
            kind: NotificationKind::Warning,
            time: "2 hrs ago".to_string(),
            read: false,
        },
        Notification {
            id: "n2".to_string(),
            title: "New Client Added".to_string(),
            message: "Srinivasa Traders added to Ravulapalem branch.".to_string(),
            kind: NotificationKind::Success,
            time: "5 hrs ago".to_string(),
            read: false,
        },
        Notification {
            id: "n3".to_string(),
            title: "Task Overdue".to_string(),
            message: "ITR Filing for Godavari Exports is overdue.".to_string(),
            kind: NotificationKind::Error,
            time: "1 day ago".to_string(),
            read: true,
        },
    ]
}

pub fn demo_data(now: DateTime<Utc>) -> DemoData {
    let clients = demo_clients();
    let tasks = demo_tasks(&clients, now);
    DemoData {
        clients,
        tasks,
        notifications: demo_notifications(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::onboarding::is_valid_pan;
    use crate::domain::reports;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn seed_is_deterministic() {
        assert_eq!(demo_data(now()).tasks, demo_data(now()).tasks);
    }

    #[test]
    fn tasks_reference_their_clients() {
        let data = demo_data(now());
        assert_eq!(data.tasks.len(), TASK_COUNT);
        for task in &data.tasks {
            let owner = data
                .clients
                .iter()
                .find(|c| c.id == task.client_id)
                .expect("task owner exists");
            assert_eq!(task.branch, owner.branch);
            assert_eq!(task.client_name, owner.name);
        }
    }

    #[test]
    fn demo_clients_cover_every_branch() {
        let clients = demo_clients();
        let ids: Vec<_> = clients.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3", "c4", "c5"]);
        for branch in [Branch::Ravulapalem, Branch::Atreyapuram, Branch::Amalapuram, Branch::Versatile] {
            assert!(clients.iter().any(|c| c.branch == branch), "{branch}");
        }
        assert_eq!(clients[1].gstin, None);
        assert_eq!(clients[4].status, ClientStatus::Inactive);
    }

    #[test]
    fn demo_pans_are_well_formed() {
        assert!(demo_clients().iter().all(|c| is_valid_pan(&c.pan)));
    }

    #[test]
    fn board_has_overdue_and_upcoming_work() {
        let data = demo_data(now());
        let overdue = reports::overdue_tasks(&data.tasks, now());
        assert!(overdue > 0);
        assert!(overdue < data.tasks.len());
    }

    #[test]
    fn every_status_appears() {
        let data = demo_data(now());
        for status in TaskStatus::ALL {
            assert!(data.tasks.iter().any(|t| t.status == *status), "{status}");
        }
    }
}
