use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::{NotificationId, UserId},
    notification::Notification,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::notification::{CreateNotificationRequest, NotificationResponse};

pub async fn register_notification(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateNotificationRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let user_exists = registry
        .user_repository()
        .find_by_id(req.user_id)
        .await?
        .is_some();
    if !user_exists {
        return Err(AppError::EntityNotFound(format!(
            "user ({}) was not found",
            req.user_id
        )));
    }

    let notification = Notification::new(req.into())?;
    registry
        .notification_repository()
        .save(&notification)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(NotificationResponse::from(notification)),
    ))
}

pub async fn list_notifications(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<NotificationResponse>>> {
    let notifications = registry.notification_repository().find_all().await?;
    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}

pub async fn get_notification(
    State(registry): State<AppRegistry>,
    Path(notification_id): Path<NotificationId>,
) -> AppResult<Json<NotificationResponse>> {
    registry
        .notification_repository()
        .find_by_id(notification_id)
        .await?
        .map(NotificationResponse::from)
        .map(Json)
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("notification ({notification_id}) was not found"))
        })
}

pub async fn list_notifications_by_user(
    State(registry): State<AppRegistry>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<Vec<NotificationResponse>>> {
    let notifications = registry
        .notification_repository()
        .find_by_user_id(user_id)
        .await?;
    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}

/// Puts a failed notification back in the queue. Sent ones stay sent.
pub async fn retry_notification(
    State(registry): State<AppRegistry>,
    Path(notification_id): Path<NotificationId>,
) -> AppResult<Json<NotificationResponse>> {
    let mut notification = registry
        .notification_repository()
        .find_by_id(notification_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("notification ({notification_id}) was not found"))
        })?;

    notification.retry()?;
    registry
        .notification_repository()
        .update(&notification)
        .await?;

    Ok(Json(NotificationResponse::from(notification)))
}
