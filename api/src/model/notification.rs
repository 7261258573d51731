use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{NotificationId, UserId},
    notification::{
        event::CreateNotification, Notification, NotificationStatus, NotificationType,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    #[garde(skip)]
    pub user_id: UserId,
    #[garde(skip)]
    pub notification_type: NotificationType,
    #[garde(length(min = 1, max = 255))]
    pub subject: String,
    #[garde(length(min = 1, max = 2000))]
    pub content: String,
}

impl From<CreateNotificationRequest> for CreateNotification {
    fn from(req: CreateNotificationRequest) -> Self {
        let CreateNotificationRequest {
            user_id,
            notification_type,
            subject,
            content,
        } = req;
        CreateNotification::new(user_id, notification_type, subject, content)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification_id: NotificationId,
    pub user_id: UserId,
    pub notification_type: NotificationType,
    pub subject: String,
    pub content: String,
    pub status: NotificationStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        let Notification {
            notification_id,
            user_id,
            notification_type,
            subject,
            content,
            status,
            sent_at,
            created_at,
            updated_at,
        } = notification;
        Self {
            notification_id,
            user_id,
            notification_type,
            subject,
            content,
            status,
            sent_at,
            created_at,
            updated_at,
        }
    }
}
