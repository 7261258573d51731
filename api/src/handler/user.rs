use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::UserId,
    user::{event::CreateUser, User},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::user::{CreateUserRequest, UpdateUserRequest, UserResponse};

pub async fn register_user(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    if registry.user_repository().email_exists(&req.email).await? {
        return Err(AppError::InvalidData(format!(
            "the email ({}) is already registered",
            req.email
        )));
    }

    let user = User::new(CreateUser::new(req.name, req.email))?;
    registry.user_repository().save(&user).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn list_users(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = registry.user_repository().find_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(registry): State<AppRegistry>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<UserResponse>> {
    registry
        .user_repository()
        .find_by_id(user_id)
        .await?
        .map(UserResponse::from)
        .map(Json)
        .ok_or_else(|| AppError::EntityNotFound(format!("user ({user_id}) was not found")))
}

pub async fn update_user(
    State(registry): State<AppRegistry>,
    Path(user_id): Path<UserId>,
    Json(req): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    req.validate(&())?;

    let mut user = registry
        .user_repository()
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("user ({user_id}) was not found")))?;

    if let Some(name) = req.name.as_deref() {
        user.update_name(name)?;
    }
    if let Some(email) = req.email.as_deref() {
        if email != user.email && registry.user_repository().email_exists(email).await? {
            return Err(AppError::InvalidData(format!(
                "the email ({email}) is already registered"
            )));
        }
        user.update_email(email)?;
    }

    registry.user_repository().update(&user).await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user(
    State(registry): State<AppRegistry>,
    Path(user_id): Path<UserId>,
) -> AppResult<StatusCode> {
    registry.user_repository().delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
