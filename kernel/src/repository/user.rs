use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{id::UserId, user::User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &User) -> AppResult<()>;
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
    async fn email_exists(&self, email: &str) -> AppResult<bool>;
    async fn update(&self, user: &User) -> AppResult<()>;
    async fn delete(&self, user_id: UserId) -> AppResult<()>;
}
