use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;

use kernel::model::{id::SpaceId, space::Space};
use kernel::repository::space::SpaceRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::space::SpaceRow, ConnectionPool};

#[derive(new)]
pub struct SpaceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl SpaceRepository for SpaceRepositoryImpl {
    async fn save(&self, space: &Space) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            INSERT INTO spaces (space_id, name, space_type, capacity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(space.space_id)
        .bind(&space.name)
        .bind(space.space_type.as_ref())
        .bind(space.capacity)
        .bind(space.created_at)
        .bind(space.updated_at)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no space record has been created".into(),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>> {
        let row = sqlx::query_as::<_, SpaceRow>(
            r#"
            SELECT space_id, name, space_type, capacity, created_at, updated_at
            FROM spaces
            WHERE space_id = $1
            "#,
        )
        .bind(space_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Space::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Space>> {
        let rows = sqlx::query_as::<_, SpaceRow>(
            r#"
            SELECT space_id, name, space_type, capacity, created_at, updated_at
            FROM spaces
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Space::try_from).collect()
    }

    async fn find_available(
        &self,
        date: NaiveDate,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> AppResult<Vec<Space>> {
        let rows = sqlx::query_as::<_, SpaceRow>(
            r#"
            SELECT s.space_id, s.name, s.space_type, s.capacity, s.created_at, s.updated_at
            FROM spaces s
            WHERE NOT EXISTS (
                SELECT 1
                FROM reservations r
                WHERE r.space_id = s.space_id
                  AND r.date = $1
                  AND r.status IN ('PENDING', 'CONFIRMED')
                  AND r.start_time < $3
                  AND r.end_time > $2
            )
            ORDER BY s.name ASC
            "#,
        )
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Space::try_from).collect()
    }

    async fn update(&self, space: &Space) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            UPDATE spaces
            SET name = $2, space_type = $3, capacity = $4, updated_at = $5
            WHERE space_id = $1
            "#,
        )
        .bind(space.space_id)
        .bind(&space.name)
        .bind(space.space_type.as_ref())
        .bind(space.capacity)
        .bind(space.updated_at)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "space ({}) was not found",
                space.space_id
            )));
        }

        Ok(())
    }

    async fn delete(&self, space_id: SpaceId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM spaces WHERE space_id = $1")
            .bind(space_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "space ({space_id}) was not found"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::space::{event::CreateSpace, SpaceType};

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a running Postgres"]
    async fn register_and_fetch_space(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = SpaceRepositoryImpl::new(ConnectionPool::new(pool));

        let space = Space::new(CreateSpace::new(
            "Main Auditorium".into(),
            SpaceType::Auditorium,
            300,
        ))?;
        repo.save(&space).await?;

        let found = repo
            .find_by_id(space.space_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("space not found"))?;
        assert_eq!(found.name, "Main Auditorium");
        assert_eq!(found.space_type, SpaceType::Auditorium);
        assert_eq!(found.capacity, 300);

        repo.delete(space.space_id).await?;
        assert!(repo.find_by_id(space.space_id).await?.is_none());
        assert!(matches!(
            repo.delete(space.space_id).await,
            Err(AppError::EntityNotFound(_))
        ));

        Ok(())
    }
}
