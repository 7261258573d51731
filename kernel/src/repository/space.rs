use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use shared::error::AppResult;

use crate::model::{id::SpaceId, space::Space};

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn save(&self, space: &Space) -> AppResult<()>;
    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>>;
    async fn find_all(&self) -> AppResult<Vec<Space>>;
    /// Spaces with no active reservation overlapping the given interval on
    /// the given date.
    async fn find_available(
        &self,
        date: NaiveDate,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> AppResult<Vec<Space>>;
    async fn update(&self, space: &Space) -> AppResult<()>;
    async fn delete(&self, space_id: SpaceId) -> AppResult<()>;
}
