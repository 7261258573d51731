use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{NotificationId, UserId},
    notification::Notification,
};

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn save(&self, notification: &Notification) -> AppResult<()>;
    async fn find_by_id(&self, notification_id: NotificationId)
        -> AppResult<Option<Notification>>;
    async fn find_all(&self) -> AppResult<Vec<Notification>>;
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Notification>>;
    async fn update(&self, notification: &Notification) -> AppResult<()>;
}
