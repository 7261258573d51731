use async_trait::async_trait;
use derive_new::new;

use kernel::model::{
    id::{NotificationId, UserId},
    notification::Notification,
};
use kernel::repository::notification::NotificationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::notification::NotificationRow, ConnectionPool};

const SELECT_NOTIFICATION: &str = r#"
    SELECT
        notification_id,
        user_id,
        notification_type,
        subject,
        content,
        status,
        sent_at,
        created_at,
        updated_at
    FROM notifications
"#;

#[derive(new)]
pub struct NotificationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn save(&self, notification: &Notification) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_id, user_id, notification_type, subject, content, status, sent_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(notification.notification_id)
        .bind(notification.user_id)
        .bind(notification.notification_type.as_ref())
        .bind(&notification.subject)
        .bind(&notification.content)
        .bind(notification.status.as_ref())
        .bind(notification.sent_at)
        .bind(notification.created_at)
        .bind(notification.updated_at)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no notification record has been created".into(),
            ));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        notification_id: NotificationId,
    ) -> AppResult<Option<Notification>> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            "{SELECT_NOTIFICATION} WHERE notification_id = $1"
        ))
        .bind(notification_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Notification::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            "{SELECT_NOTIFICATION} ORDER BY created_at DESC"
        ))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            "{SELECT_NOTIFICATION} WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn update(&self, notification: &Notification) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            UPDATE notifications
            SET status = $2, sent_at = $3, updated_at = $4
            WHERE notification_id = $1
            "#,
        )
        .bind(notification.notification_id)
        .bind(notification.status.as_ref())
        .bind(notification.sent_at)
        .bind(notification.updated_at)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "notification ({}) was not found",
                notification.notification_id
            )));
        }

        Ok(())
    }
}
