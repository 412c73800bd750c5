//! Notification service
//!
//! Raises in-app notifications when something noteworthy happens elsewhere in
//! the application.

use uuid::Uuid;

use super::directory::Directory;
use crate::domain::{Client, Notification, NotificationKind};

/// Post a notification and return its id.
pub fn create_notification(
    directory: &Directory,
    kind: NotificationKind,
    title: &str,
    message: &str,
) -> String {
    let id = Uuid::new_v4().to_string();
    directory.push_notification(Notification {
        id: id.clone(),
        title: title.to_string(),
        message: message.to_string(),
        kind,
        time: "Just now".to_string(),
        read: false,
    });

    tracing::info!(
        notification_id = %id,
        kind = %kind,
        "Notification created"
    );

    id
}

/// Announce a newly onboarded client
pub fn notify_client_added(directory: &Directory, client: &Client) -> String {
    create_notification(
        directory,
        NotificationKind::Success,
        "New Client Added",
        &format!("{} added to {} branch.", client.name, client.branch),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed::demo_clients;

    #[test]
    fn client_added_notification_is_unread_and_first() {
        let dir = Directory::default();
        let client = demo_clients().remove(2);

        let id = notify_client_added(&dir, &client);

        let all = dir.notifications(false);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].message, "Godavari Exports added to Amalapuram branch.");
        assert_eq!(all[0].kind, NotificationKind::Success);
        assert_eq!(dir.unread_count(), 1);
    }
}
