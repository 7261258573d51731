use kernel::model::{id::UserId, user::User};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let UserRow {
            user_id,
            name,
            email,
            created_at,
            updated_at,
        } = row;
        User {
            user_id,
            name,
            email,
            created_at,
            updated_at,
        }
    }
}
