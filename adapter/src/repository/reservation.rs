use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;

use kernel::model::{
    id::{ReservationId, SpaceId, UserId},
    reservation::Reservation,
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::reservation::ReservationRow, ConnectionPool};

const SELECT_RESERVATION: &str = r#"
    SELECT
        reservation_id,
        user_id,
        space_id,
        date,
        start_time,
        end_time,
        status,
        created_at,
        updated_at
    FROM reservations
"#;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn save(&self, reservation: &Reservation) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // The handler has already rejected conflicting requests, but two
        // concurrent creations can both pass that check. Re-running it here
        // under SERIALIZABLE isolation closes the check-then-insert race.
        self.set_transaction_serializable(&mut tx).await?;

        let overlap = sqlx::query_scalar::<_, ReservationId>(
            r#"
            SELECT reservation_id
            FROM reservations
            WHERE space_id = $1
              AND date = $2
              AND status IN ('PENDING', 'CONFIRMED')
              AND start_time < $4
              AND end_time > $3
            LIMIT 1
            "#,
        )
        .bind(reservation.space_id)
        .bind(reservation.date)
        .bind(reservation.start_time)
        .bind(reservation.end_time)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if overlap.is_some() {
            return Err(AppError::BusinessRuleViolation(format!(
                "space ({}) already has an active reservation in the requested time slot",
                reservation.space_id
            )));
        }

        let res = sqlx::query(
            r#"
            INSERT INTO reservations
            (reservation_id, user_id, space_id, date, start_time, end_time, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(reservation.reservation_id)
        .bind(reservation.user_id)
        .bind(reservation.space_id)
        .bind(reservation.date)
        .bind(reservation.start_time)
        .bind(reservation.end_time)
        .bind(reservation.status.as_ref())
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no reservation record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            "{SELECT_RESERVATION} WHERE reservation_id = $1"
        ))
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Reservation::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "{SELECT_RESERVATION} ORDER BY created_at DESC"
        ))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "{SELECT_RESERVATION} WHERE user_id = $1 ORDER BY date DESC"
        ))
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_by_space_id(&self, space_id: SpaceId) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "{SELECT_RESERVATION} WHERE space_id = $1 ORDER BY date DESC"
        ))
        .bind(space_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_by_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "{SELECT_RESERVATION} WHERE date BETWEEN $1 AND $2 ORDER BY date ASC"
        ))
        .bind(from)
        .bind(to)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_conflicting(
        &self,
        space_id: SpaceId,
        date: NaiveDate,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        exclude: Option<ReservationId>,
    ) -> AppResult<Vec<Reservation>> {
        // Overlap on half-open intervals: existing.start < new.end AND
        // existing.end > new.start. Back-to-back slots pass.
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
            {SELECT_RESERVATION}
            WHERE space_id = $1
              AND date = $2
              AND status IN ('PENDING', 'CONFIRMED')
              AND start_time < $4
              AND end_time > $3
              AND ($5::uuid IS NULL OR reservation_id <> $5)
            "#
        ))
        .bind(space_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .bind(exclude)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn update(&self, reservation: &Reservation) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            UPDATE reservations
            SET status = $2, updated_at = $3
            WHERE reservation_id = $1
            "#,
        )
        .bind(reservation.reservation_id)
        .bind(reservation.status.as_ref())
        .bind(reservation.updated_at)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "reservation ({}) was not found",
                reservation.reservation_id
            )));
        }

        Ok(())
    }
}

impl ReservationRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{space::SpaceRepositoryImpl, user::UserRepositoryImpl};
    use chrono::Days;
    use kernel::model::reservation::event::CreateReservation;
    use kernel::model::space::{event::CreateSpace, SpaceType};
    use kernel::model::user::event::CreateUser;
    use kernel::model::{space::Space, user::User};
    use kernel::repository::{space::SpaceRepository, user::UserRepository};

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a running Postgres"]
    async fn overlapping_insert_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let users = UserRepositoryImpl::new(db.clone());
        let spaces = SpaceRepositoryImpl::new(db.clone());
        let repo = ReservationRepositoryImpl::new(db);

        let user = User::new(CreateUser::new("Test User".into(), "test@example.com".into()))?;
        users.save(&user).await?;
        let space = Space::new(CreateSpace::new("Court".into(), SpaceType::SportsCourt, 10))?;
        spaces.save(&space).await?;

        let date = Utc::now().date_naive() + Days::new(7);
        let at = |h: u32| date.and_hms_opt(h, 0, 0).unwrap().and_utc();

        let first = Reservation::new(CreateReservation::new(
            user.user_id,
            space.space_id,
            date,
            at(9),
            at(11),
        ))?;
        repo.save(&first).await?;

        let overlapping = Reservation::new(CreateReservation::new(
            user.user_id,
            space.space_id,
            date,
            at(10),
            at(12),
        ))?;
        assert!(matches!(
            repo.save(&overlapping).await,
            Err(AppError::BusinessRuleViolation(_))
        ));

        // Back-to-back is allowed.
        let adjacent = Reservation::new(CreateReservation::new(
            user.user_id,
            space.space_id,
            date,
            at(11),
            at(13),
        ))?;
        repo.save(&adjacent).await?;

        let conflicts = repo
            .find_conflicting(space.space_id, date, at(10), at(12), None)
            .await?;
        assert_eq!(conflicts.len(), 2);

        Ok(())
    }
}
