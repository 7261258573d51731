use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;

use crate::model::id::{SpaceId, UserId};

#[derive(Debug, new)]
pub struct CreateReservation {
    pub user_id: UserId,
    pub space_id: SpaceId,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}
