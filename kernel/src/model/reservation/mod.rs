use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

use crate::model::id::{ReservationId, SpaceId, UserId};

pub mod event;

use event::CreateReservation;

pub const MIN_DURATION_MINUTES: i64 = 30;
pub const MAX_DURATION_HOURS: i64 = 8;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// Active reservations are the only ones that participate in conflicts.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
                | (Confirmed, Completed)
        )
    }

    pub fn transition_to(self, next: ReservationStatus) -> AppResult<ReservationStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(AppError::BusinessRuleViolation(format!(
                "illegal reservation status transition: {self} -> {next}"
            )))
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reservation {
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

impl Reservation {
    /// Builds a new reservation in `Pending` state, rejecting any input that
    /// violates the booking rules. The future-start rule applies only here,
    /// not when stored reservations are rebuilt from their rows.
    pub fn new(event: CreateReservation) -> AppResult<Self> {
        let CreateReservation {
            user_id,
            space_id,
            date,
            start_time,
            end_time,
        } = event;

        validate_interval(date, start_time, end_time)?;

        let now = Utc::now();
        if start_time <= now {
            return Err(AppError::BusinessRuleViolation(
                "reservations cannot start in the past".into(),
            ));
        }

        Ok(Self {
            reservation_id: ReservationId::new(),
            user_id,
            space_id,
            date,
            start_time,
            end_time,
            status: ReservationStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn confirm(&mut self) -> AppResult<()> {
        self.status = self.status.transition_to(ReservationStatus::Confirmed)?;
        self.touch();
        Ok(())
    }

    /// Cancels on behalf of `requested_by`. Only the owning user may cancel;
    /// the status transition itself carries no notion of an actor.
    pub fn cancel(&mut self, requested_by: UserId) -> AppResult<()> {
        if requested_by != self.user_id {
            return Err(AppError::UnauthorizedOperation(
                "only the owning user can cancel a reservation".into(),
            ));
        }
        self.status = self.status.transition_to(ReservationStatus::Cancelled)?;
        self.touch();
        Ok(())
    }

    pub fn complete(&mut self) -> AppResult<()> {
        self.status = self.status.transition_to(ReservationStatus::Completed)?;
        self.touch();
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Half-open interval overlap: touching endpoints do not overlap.
    pub fn overlaps(&self, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> bool {
        self.start_time < end_time && self.end_time > start_time
    }

    pub fn conflicts_with(&self, other: &Reservation) -> bool {
        self.space_id == other.space_id
            && self.date == other.date
            && self.status.is_active()
            && other.status.is_active()
            && self.overlaps(other.start_time, other.end_time)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validate_interval(
    date: NaiveDate,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> AppResult<()> {
    if start_time >= end_time {
        return Err(AppError::InvalidData(
            "start time must be earlier than end time".into(),
        ));
    }

    if start_time.date_naive() != date {
        return Err(AppError::InvalidData(
            "start time must fall on the reservation date".into(),
        ));
    }

    let duration = end_time - start_time;
    if duration < Duration::minutes(MIN_DURATION_MINUTES) {
        return Err(AppError::BusinessRuleViolation(format!(
            "reservations must last at least {MIN_DURATION_MINUTES} minutes"
        )));
    }
    if duration > Duration::hours(MAX_DURATION_HOURS) {
        return Err(AppError::BusinessRuleViolation(format!(
            "reservations cannot last longer than {MAX_DURATION_HOURS} hours"
        )));
    }

    Ok(())
}

/// Returns every active reservation for `space_id` on `date` whose interval
/// overlaps `[start_time, end_time)`, optionally leaving out the reservation
/// being modified.
pub fn find_conflicts<'a>(
    existing: &'a [Reservation],
    space_id: SpaceId,
    date: NaiveDate,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    exclude: Option<ReservationId>,
) -> Vec<&'a Reservation> {
    existing
        .iter()
        .filter(|r| {
            exclude != Some(r.reservation_id)
                && r.space_id == space_id
                && r.date == date
                && r.status.is_active()
                && r.overlaps(start_time, end_time)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn future_date() -> NaiveDate {
        Utc::now().date_naive() + Days::new(7)
    }

    fn at(date: NaiveDate, hour: u32, min: u32) -> DateTime<Utc> {
        date.and_hms_opt(hour, min, 0).unwrap().and_utc()
    }

    fn reservation_on(
        space_id: SpaceId,
        date: NaiveDate,
        start: (u32, u32),
        end: (u32, u32),
        status: ReservationStatus,
    ) -> Reservation {
        let now = Utc::now();
        Reservation {
            reservation_id: ReservationId::new(),
            user_id: UserId::new(),
            space_id,
            date,
            start_time: at(date, start.0, start.1),
            end_time: at(date, end.0, end.1),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_event(start: (u32, u32), end: (u32, u32)) -> CreateReservation {
        let date = future_date();
        CreateReservation::new(
            UserId::new(),
            SpaceId::new(),
            date,
            at(date, start.0, start.1),
            at(date, end.0, end.1),
        )
    }

    #[test]
    fn new_reservation_starts_pending() {
        let reservation = Reservation::new(create_event((9, 0), (11, 0))).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert!(reservation.is_active());
    }

    #[test]
    fn start_must_be_before_end() {
        let date = future_date();
        let event = CreateReservation::new(
            UserId::new(),
            SpaceId::new(),
            date,
            at(date, 11, 0),
            at(date, 11, 0),
        );
        assert!(matches!(
            Reservation::new(event),
            Err(AppError::InvalidData(_))
        ));
    }

    #[test]
    fn start_must_fall_on_the_reservation_date() {
        let date = future_date();
        let event = CreateReservation::new(
            UserId::new(),
            SpaceId::new(),
            date,
            at(date + Days::new(1), 9, 0),
            at(date + Days::new(1), 10, 0),
        );
        assert!(matches!(
            Reservation::new(event),
            Err(AppError::InvalidData(_))
        ));
    }

    #[test]
    fn duration_shorter_than_thirty_minutes_is_rejected() {
        assert!(matches!(
            Reservation::new(create_event((9, 0), (9, 29))),
            Err(AppError::BusinessRuleViolation(_))
        ));
    }

    #[test]
    fn duration_of_exactly_thirty_minutes_is_accepted() {
        assert!(Reservation::new(create_event((9, 0), (9, 30))).is_ok());
    }

    #[test]
    fn duration_longer_than_eight_hours_is_rejected() {
        assert!(matches!(
            Reservation::new(create_event((9, 0), (17, 1))),
            Err(AppError::BusinessRuleViolation(_))
        ));
    }

    #[test]
    fn duration_of_exactly_eight_hours_is_accepted() {
        assert!(Reservation::new(create_event((9, 0), (17, 0))).is_ok());
    }

    #[test]
    fn past_start_time_is_rejected() {
        let date = Utc::now().date_naive() - Days::new(1);
        let event = CreateReservation::new(
            UserId::new(),
            SpaceId::new(),
            date,
            at(date, 9, 0),
            at(date, 11, 0),
        );
        assert!(matches!(
            Reservation::new(event),
            Err(AppError::BusinessRuleViolation(_))
        ));
    }

    #[test]
    fn legal_transitions_succeed() {
        let space_id = SpaceId::new();
        let date = future_date();

        let mut r = reservation_on(space_id, date, (9, 0), (11, 0), ReservationStatus::Pending);
        assert!(r.confirm().is_ok());
        assert_eq!(r.status, ReservationStatus::Confirmed);
        assert!(r.complete().is_ok());
        assert_eq!(r.status, ReservationStatus::Completed);

        let mut r = reservation_on(space_id, date, (9, 0), (11, 0), ReservationStatus::Pending);
        let owner = r.user_id;
        assert!(r.cancel(owner).is_ok());
        assert_eq!(r.status, ReservationStatus::Cancelled);

        let mut r = reservation_on(space_id, date, (9, 0), (11, 0), ReservationStatus::Confirmed);
        let owner = r.user_id;
        assert!(r.cancel(owner).is_ok());
    }

    #[test]
    fn illegal_transitions_fail() {
        let space_id = SpaceId::new();
        let date = future_date();

        let mut r = reservation_on(space_id, date, (9, 0), (11, 0), ReservationStatus::Pending);
        assert!(matches!(
            r.complete(),
            Err(AppError::BusinessRuleViolation(_))
        ));

        let mut r = reservation_on(space_id, date, (9, 0), (11, 0), ReservationStatus::Confirmed);
        assert!(r.confirm().is_err());

        // Terminal states allow nothing further.
        for status in [ReservationStatus::Cancelled, ReservationStatus::Completed] {
            let mut r = reservation_on(space_id, date, (9, 0), (11, 0), status);
            let owner = r.user_id;
            assert!(r.confirm().is_err());
            assert!(r.cancel(owner).is_err());
            assert!(r.complete().is_err());
            assert_eq!(r.status, status);
        }
    }

    #[test]
    fn only_the_owner_can_cancel() {
        let mut r = reservation_on(
            SpaceId::new(),
            future_date(),
            (9, 0),
            (11, 0),
            ReservationStatus::Confirmed,
        );
        let before = r.status;
        assert!(matches!(
            r.cancel(UserId::new()),
            Err(AppError::UnauthorizedOperation(_))
        ));
        assert_eq!(r.status, before);
    }

    #[test]
    fn overlapping_intervals_conflict() {
        let space_id = SpaceId::new();
        let date = future_date();
        let existing = vec![reservation_on(
            space_id,
            date,
            (9, 0),
            (11, 0),
            ReservationStatus::Confirmed,
        )];

        let conflicts = find_conflicts(
            &existing,
            space_id,
            date,
            at(date, 10, 30),
            at(date, 12, 0),
            None,
        );
        assert_eq!(conflicts.len(), 1);
    }

    #[test]
    fn back_to_back_intervals_do_not_conflict() {
        let space_id = SpaceId::new();
        let date = future_date();
        let existing = vec![reservation_on(
            space_id,
            date,
            (9, 0),
            (11, 0),
            ReservationStatus::Confirmed,
        )];

        let conflicts = find_conflicts(
            &existing,
            space_id,
            date,
            at(date, 11, 0),
            at(date, 12, 0),
            None,
        );
        assert!(conflicts.is_empty());
    }

    #[test]
    fn cancelled_and_completed_reservations_never_conflict() {
        let space_id = SpaceId::new();
        let date = future_date();
        let existing = vec![
            reservation_on(space_id, date, (9, 0), (11, 0), ReservationStatus::Cancelled),
            reservation_on(space_id, date, (9, 0), (11, 0), ReservationStatus::Completed),
        ];

        let conflicts = find_conflicts(
            &existing,
            space_id,
            date,
            at(date, 9, 30),
            at(date, 10, 30),
            None,
        );
        assert!(conflicts.is_empty());
    }

    #[test]
    fn other_spaces_and_dates_do_not_conflict() {
        let space_id = SpaceId::new();
        let date = future_date();
        let existing = vec![
            reservation_on(
                SpaceId::new(),
                date,
                (9, 0),
                (11, 0),
                ReservationStatus::Pending,
            ),
            reservation_on(
                space_id,
                date + Days::new(1),
                (9, 0),
                (11, 0),
                ReservationStatus::Pending,
            ),
        ];

        let conflicts = find_conflicts(
            &existing,
            space_id,
            date,
            at(date, 9, 0),
            at(date, 11, 0),
            None,
        );
        assert!(conflicts.is_empty());
    }

    #[test]
    fn exclusion_skips_the_reservation_being_modified() {
        let space_id = SpaceId::new();
        let date = future_date();
        let existing = vec![reservation_on(
            space_id,
            date,
            (9, 0),
            (11, 0),
            ReservationStatus::Pending,
        )];
        let own_id = existing[0].reservation_id;

        let conflicts = find_conflicts(
            &existing,
            space_id,
            date,
            at(date, 9, 0),
            at(date, 11, 0),
            Some(own_id),
        );
        assert!(conflicts.is_empty());
    }

    #[test]
    fn conflicts_with_is_symmetric_over_overlap() {
        let space_id = SpaceId::new();
        let date = future_date();
        let a = reservation_on(space_id, date, (9, 0), (11, 0), ReservationStatus::Confirmed);
        let b = reservation_on(space_id, date, (10, 30), (12, 0), ReservationStatus::Pending);
        let c = reservation_on(space_id, date, (11, 0), (12, 0), ReservationStatus::Pending);

        assert!(a.conflicts_with(&b));
        assert!(b.conflicts_with(&a));
        assert!(!a.conflicts_with(&c));
        assert!(!c.conflicts_with(&a));
    }
}
