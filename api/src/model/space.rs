use chrono::{DateTime, NaiveDate, Utc};
use garde::Validate;
use kernel::model::{
    id::SpaceId,
    space::{Space, SpaceType},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceRequest {
    #[garde(length(min = 1, max = 100))]
    pub name: String,
    #[garde(skip)]
    pub space_type: SpaceType,
    #[garde(range(min = 1, max = 1000))]
    pub capacity: i32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpaceRequest {
    #[garde(inner(length(min = 1, max = 100)))]
    pub name: Option<String>,
    #[garde(skip)]
    pub space_type: Option<SpaceType>,
    #[garde(inner(range(min = 1, max = 1000)))]
    pub capacity: Option<i32>,
}

/// Query for spaces free over a whole time slot, optionally filtered by the
/// headcount they must hold.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSpacesQuery {
    #[garde(skip)]
    pub date: NaiveDate,
    #[garde(skip)]
    pub start_time: DateTime<Utc>,
    #[garde(skip)]
    pub end_time: DateTime<Utc>,
    #[garde(inner(range(min = 1)))]
    pub min_capacity: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceResponse {
    pub space_id: SpaceId,
    pub name: String,
    pub space_type: SpaceType,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Space> for SpaceResponse {
    fn from(space: Space) -> Self {
        let Space {
            space_id,
            name,
            space_type,
            capacity,
            created_at,
            updated_at,
        } = space;
        Self {
            space_id,
            name,
            space_type,
            capacity,
            created_at,
            updated_at,
        }
    }
}
