use kernel::model::{
    id::{NotificationId, UserId},
    notification::{Notification, NotificationStatus, NotificationType},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct NotificationRow {
    pub notification_id: NotificationId,
    pub user_id: UserId,
    pub notification_type: String,
    pub subject: String,
    pub content: String,
    pub status: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let NotificationRow {
            notification_id,
            user_id,
            notification_type,
            subject,
            content,
            status,
            sent_at,
            created_at,
            updated_at,
        } = row;
        let notification_type = NotificationType::from_str(&notification_type).map_err(|_| {
            AppError::ConversionEntityError(format!(
                "unknown notification type: {notification_type}"
            ))
        })?;
        let status = NotificationStatus::from_str(&status).map_err(|_| {
            AppError::ConversionEntityError(format!("unknown notification status: {status}"))
        })?;
        Ok(Notification {
            notification_id,
            user_id,
            notification_type,
            subject,
            content,
            status,
            sent_at,
            created_at,
            updated_at,
        })
    }
}
