use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use shared::error::AppResult;

use crate::model::{
    id::{ReservationId, SpaceId, UserId},
    reservation::Reservation,
};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persists a new reservation. Implementations must re-run the conflict
    /// check atomically with the insert; two concurrent bookings for the same
    /// slot must not both commit.
    async fn save(&self, reservation: &Reservation) -> AppResult<()>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    async fn find_all(&self) -> AppResult<Vec<Reservation>>;
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>>;
    async fn find_by_space_id(&self, space_id: SpaceId) -> AppResult<Vec<Reservation>>;
    async fn find_by_date_range(&self, from: NaiveDate, to: NaiveDate)
        -> AppResult<Vec<Reservation>>;
    /// Active reservations for the space and date overlapping
    /// `[start_time, end_time)`, minus the excluded one when re-checking an
    /// update.
    async fn find_conflicting(
        &self,
        space_id: SpaceId,
        date: NaiveDate,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        exclude: Option<ReservationId>,
    ) -> AppResult<Vec<Reservation>>;
    /// Writes back a status change (and the refreshed `updated_at`).
    async fn update(&self, reservation: &Reservation) -> AppResult<()>;
}
