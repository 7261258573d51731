use chrono::{DateTime, NaiveDate, Utc};
use garde::Validate;
use kernel::model::{
    id::{ReservationId, SpaceId, UserId},
    reservation::{event::CreateReservation, Reservation, ReservationStatus},
};
use serde::{Deserialize, Serialize};

use crate::model::{space::SpaceResponse, user::UserResponse};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub user_id: UserId,
    #[garde(skip)]
    pub space_id: SpaceId,
    #[garde(skip)]
    pub date: NaiveDate,
    #[garde(skip)]
    pub start_time: DateTime<Utc>,
    #[garde(skip)]
    pub end_time: DateTime<Utc>,
}

impl From<CreateReservationRequest> for CreateReservation {
    fn from(req: CreateReservationRequest) -> Self {
        let CreateReservationRequest {
            user_id,
            space_id,
            date,
            start_time,
            end_time,
        } = req;
        CreateReservation::new(user_id, space_id, date, start_time, end_time)
    }
}

/// Cancellation carries the requesting user so ownership can be enforced.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelReservationRequest {
    pub user_id: UserId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReservationsQuery {
    pub user_id: Option<UserId>,
    pub space_id: Option<SpaceId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub space_id: SpaceId,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        let Reservation {
            reservation_id,
            user_id,
            space_id,
            date,
            start_time,
            end_time,
            status,
            created_at,
            updated_at,
        } = reservation;
        Self {
            reservation_id,
            user_id,
            space_id,
            date,
            start_time,
            end_time,
            status,
            created_at,
            updated_at,
        }
    }
}

/// Single-reservation view with its user and space embedded. Either side can
/// be missing when the referenced record has since been deleted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetailResponse {
    #[serde(flatten)]
    pub reservation: ReservationResponse,
    pub user: Option<UserResponse>,
    pub space: Option<SpaceResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, Utc};

    fn sample() -> Reservation {
        let date = Utc::now().date_naive() + Days::new(3);
        let start_time = date.and_hms_opt(9, 0, 0).unwrap().and_utc();
        let end_time = date.and_hms_opt(11, 0, 0).unwrap().and_utc();
        Reservation::new(CreateReservation::new(
            UserId::new(),
            SpaceId::new(),
            date,
            start_time,
            end_time,
        ))
        .unwrap()
    }

    #[test]
    fn response_uses_camel_case_keys_and_screaming_status() {
        let json =
            serde_json::to_value(ReservationResponse::from(sample())).unwrap();
        assert!(json.get("reservationId").is_some());
        assert!(json.get("startTime").is_some());
        assert!(json.get("reservation_id").is_none());
        assert_eq!(json["status"], "PENDING");
    }

    #[test]
    fn request_maps_into_create_event() {
        let date = Utc::now().date_naive() + Days::new(3);
        let req = CreateReservationRequest {
            user_id: UserId::new(),
            space_id: SpaceId::new(),
            date,
            start_time: date.and_hms_opt(9, 0, 0).unwrap().and_utc(),
            end_time: date.and_hms_opt(10, 0, 0).unwrap().and_utc(),
        };
        let user_id = req.user_id;
        let event: CreateReservation = req.into();
        assert_eq!(event.user_id, user_id);
        assert_eq!(event.date, date);
    }
}
