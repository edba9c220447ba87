use async_trait::async_trait;
use derive_new::new;
use kernel::model::facility::{
    event::{CreateFacility, DeleteFacility, UpdateFacility},
    Facility,
};
use kernel::model::id::FacilityId;
use kernel::repository::facility::FacilityRepository;
use shared::error::{AppError, AppResult};

use crate::database::model::facility::FacilityRow;
use crate::database::ConnectionPool;

#[derive(new)]
pub struct FacilityRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl FacilityRepository for FacilityRepositoryImpl {
    async fn create(&self, event: CreateFacility) -> AppResult<FacilityId> {
        let facility_id = FacilityId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO facilities (facility_id, facility_name)
                VALUES ($1, $2)
            "#,
        )
        .bind(facility_id.raw())
        .bind(&event.facility_name)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no facility record has been created".into(),
            ));
        }

        Ok(facility_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Facility>> {
        let rows: Vec<FacilityRow> = sqlx::query_as(
            r#"
                SELECT facility_id, facility_name
                FROM facilities
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Facility::from).collect())
    }

    async fn update(&self, event: UpdateFacility) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE facilities
                SET facility_name = $1, updated_at = CURRENT_TIMESTAMP
                WHERE facility_id = $2
            "#,
        )
        .bind(&event.facility_name)
        .bind(event.facility_id.raw())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "facility ({}) was not found",
                event.facility_id
            )));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteFacility) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // Checked at the application layer so the rejection can carry
        // the number of blocking references.
        let referencing: i64 = sqlx::query_scalar(
            r#"
                SELECT COUNT(*) FROM post_facilities WHERE facility_id = $1
            "#,
        )
        .bind(event.facility_id.raw())
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if referencing > 0 {
            return Err(AppError::FacilityInUse(referencing));
        }

        let res = sqlx::query(
            r#"
                DELETE FROM facilities WHERE facility_id = $1
            "#,
        )
        .bind(event.facility_id.raw())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "facility ({}) was not found",
                event.facility_id
            )));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[sqlx::test(migrations = "../migrations")]
    async fn facility_crud_round_trip(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = FacilityRepositoryImpl::new(ConnectionPool::new(pool));

        let wifi = repo.create(CreateFacility::new("WiFi".into())).await?;
        repo.create(CreateFacility::new("Parking".into())).await?;

        let all = repo.find_all().await?;
        assert_eq!(all.len(), 2);

        repo.update(UpdateFacility::new(wifi, "Fibre WiFi".into()))
            .await?;
        let all = repo.find_all().await?;
        assert!(all.iter().any(|f| f.facility_name == "Fibre WiFi"));

        repo.delete(DeleteFacility::new(wifi)).await?;
        let all = repo.find_all().await?;
        assert_eq!(all.len(), 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn update_of_missing_facility_is_not_found(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = FacilityRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo
            .update(UpdateFacility::new(FacilityId::new(), "Laundry".into()))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn delete_is_blocked_while_posts_reference_the_facility(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = FacilityRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let facility_id = repo.create(CreateFacility::new("WiFi".into())).await?;

        // Two posts referencing the facility, seeded directly.
        let login_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO logins (login_id, name, email, password_hash, role, is_active)
             VALUES ($1, 'Owner', 'owner@example.com', 'x', 'accommodater', TRUE)",
        )
        .bind(login_id)
        .execute(&pool)
        .await?;
        let profile_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO user_profiles
             (profile_id, login_id, full_name, address, phone, occupation, gender)
             VALUES ($1, $2, 'Owner', 'Addr', '000', 'none', 'male')",
        )
        .bind(profile_id)
        .bind(login_id)
        .execute(&pool)
        .await?;
        for title in ["a", "b"] {
            let post_id = Uuid::new_v4();
            sqlx::query(
                "INSERT INTO posts
                 (post_id, title, price, location, category, gender, description, image_url, owned_by)
                 VALUES ($1, $2, '1000', 'Galle', 'single', 'any', 'd', 'u', $3)",
            )
            .bind(post_id)
            .bind(title)
            .bind(profile_id)
            .execute(&pool)
            .await?;
            sqlx::query("INSERT INTO post_facilities (post_id, facility_id) VALUES ($1, $2)")
                .bind(post_id)
                .bind(facility_id.raw())
                .execute(&pool)
                .await?;
        }

        let res = repo.delete(DeleteFacility::new(facility_id)).await;
        match res {
            Err(AppError::FacilityInUse(count)) => assert_eq!(count, 2),
            other => panic!("expected FacilityInUse, got {other:?}"),
        }

        // The facility row must remain.
        let remaining = repo.find_all().await?;
        assert_eq!(remaining.len(), 1);
        Ok(())
    }
}
