use derive_new::new;

use super::NotificationType;
use crate::model::id::UserId;

#[derive(Debug, new)]
pub struct CreateNotification {
    pub user_id: UserId,
    pub notification_type: NotificationType,
    pub subject: String,
    pub content: String,
}
