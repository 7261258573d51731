use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::SpaceId,
    space::{event::CreateSpace, Space},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::space::{
    AvailableSpacesQuery, CreateSpaceRequest, SpaceResponse, UpdateSpaceRequest,
};

pub async fn register_space(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateSpaceRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let space = Space::new(CreateSpace::new(req.name, req.space_type, req.capacity))?;
    registry.space_repository().save(&space).await?;

    Ok((StatusCode::CREATED, Json(SpaceResponse::from(space))))
}

pub async fn list_spaces(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<SpaceResponse>>> {
    let spaces = registry.space_repository().find_all().await?;
    Ok(Json(spaces.into_iter().map(SpaceResponse::from).collect()))
}

/// Spaces with no active reservation overlapping the requested slot,
/// optionally narrowed to those holding at least `minCapacity` people.
pub async fn list_available_spaces(
    State(registry): State<AppRegistry>,
    Query(query): Query<AvailableSpacesQuery>,
) -> AppResult<Json<Vec<SpaceResponse>>> {
    query.validate(&())?;

    if query.start_time >= query.end_time {
        return Err(AppError::InvalidData(
            "the start time must be before the end time".into(),
        ));
    }

    let spaces = registry
        .space_repository()
        .find_available(query.date, query.start_time, query.end_time)
        .await?;

    let spaces = spaces
        .into_iter()
        .filter(|space| {
            query
                .min_capacity
                .map(|required| space.can_accommodate(required))
                .unwrap_or(true)
        })
        .map(SpaceResponse::from)
        .collect();

    Ok(Json(spaces))
}

pub async fn get_space(
    State(registry): State<AppRegistry>,
    Path(space_id): Path<SpaceId>,
) -> AppResult<Json<SpaceResponse>> {
    registry
        .space_repository()
        .find_by_id(space_id)
        .await?
        .map(SpaceResponse::from)
        .map(Json)
        .ok_or_else(|| AppError::EntityNotFound(format!("space ({space_id}) was not found")))
}

pub async fn update_space(
    State(registry): State<AppRegistry>,
    Path(space_id): Path<SpaceId>,
    Json(req): Json<UpdateSpaceRequest>,
) -> AppResult<Json<SpaceResponse>> {
    req.validate(&())?;

    let mut space = registry
        .space_repository()
        .find_by_id(space_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("space ({space_id}) was not found")))?;

    if let Some(name) = req.name.as_deref() {
        space.update_name(name)?;
    }
    if let Some(space_type) = req.space_type {
        space.update_space_type(space_type);
    }
    if let Some(capacity) = req.capacity {
        space.update_capacity(capacity)?;
    }

    registry.space_repository().update(&space).await?;

    Ok(Json(SpaceResponse::from(space)))
}

pub async fn delete_space(
    State(registry): State<AppRegistry>,
    Path(space_id): Path<SpaceId>,
) -> AppResult<StatusCode> {
    registry.space_repository().delete(space_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
