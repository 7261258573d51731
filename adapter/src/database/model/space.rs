use kernel::model::{
    id::SpaceId,
    space::{Space, SpaceType},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct SpaceRow {
    pub space_id: SpaceId,
    pub name: String,
    pub space_type: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SpaceRow> for Space {
    type Error = AppError;

    fn try_from(row: SpaceRow) -> Result<Self, Self::Error> {
        let SpaceRow {
            space_id,
            name,
            space_type,
            capacity,
            created_at,
            updated_at,
        } = row;
        let space_type = SpaceType::from_str(&space_type).map_err(|_| {
            AppError::ConversionEntityError(format!("unknown space type: {space_type}"))
        })?;
        Ok(Space {
            space_id,
            name,
            space_type,
            capacity,
            created_at,
            updated_at,
        })
    }
}
