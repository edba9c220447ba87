use async_trait::async_trait;
use derive_new::new;
use kernel::model::id::UserId;
use kernel::model::user::{
    event::{CreateUser, ResetPassword, UpdateUserPassword},
    OwnerProfile, User,
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

use crate::database::model::user::{LoginCredentialRow, OwnerProfileRow, UserRow};
use crate::database::ConnectionPool;

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<UserId> {
        let existing = sqlx::query_scalar::<_, Uuid>(
            r#"
                SELECT login_id FROM logins WHERE email = $1
            "#,
        )
        .bind(&event.email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if existing.is_some() {
            return Err(AppError::UnprocessableEntity(
                "a user with the given email already exists".into(),
            ));
        }

        let password_hash = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;

        // Login record and owner profile are one atomic unit; a login
        // without a profile would break listing-owner resolution.
        let mut tx = self.db.begin().await?;

        let login_id = UserId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO logins (login_id, name, email, password_hash, role, avatar)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(login_id.raw())
        .bind(&event.full_name)
        .bind(&event.email)
        .bind(&password_hash)
        .bind(event.role.as_ref())
        .bind(&event.avatar)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no login record has been created".into(),
            ));
        }

        let res = sqlx::query(
            r#"
                INSERT INTO user_profiles
                (profile_id, login_id, full_name, address, phone, occupation, gender)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(login_id.raw())
        .bind(&event.full_name)
        .bind(&event.address)
        .bind(&event.phone)
        .bind(&event.occupation)
        .bind(&event.gender)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no user profile record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(login_id)
    }

    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT login_id, name, email, role, avatar, is_active
                FROM logins
                WHERE login_id = $1
            "#,
        )
        .bind(user_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
                SELECT login_id, name, email, role, avatar, is_active
                FROM logins
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_profile_by_login_id(&self, login_id: UserId) -> AppResult<Option<OwnerProfile>> {
        let row: Option<OwnerProfileRow> = sqlx::query_as(
            r#"
                SELECT profile_id, login_id, full_name, address, phone, occupation, gender
                FROM user_profiles
                WHERE login_id = $1
            "#,
        )
        .bind(login_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(OwnerProfile::from))
    }

    async fn activate(&self, user_id: UserId) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE logins
                SET is_active = TRUE, updated_at = CURRENT_TIMESTAMP
                WHERE login_id = $1
            "#,
        )
        .bind(user_id.raw())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "login ({user_id}) was not found"
            )));
        }

        Ok(())
    }

    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()> {
        let row: Option<LoginCredentialRow> = sqlx::query_as(
            r#"
                SELECT login_id, password_hash, is_active
                FROM logins
                WHERE login_id = $1
            "#,
        )
        .bind(event.user_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::EntityNotFound(format!(
                "login ({}) was not found",
                event.user_id
            )));
        };

        if !bcrypt::verify(&event.current_password, &row.password_hash)? {
            return Err(AppError::UnauthenticatedError);
        }

        let new_hash = bcrypt::hash(&event.new_password, bcrypt::DEFAULT_COST)?;
        sqlx::query(
            r#"
                UPDATE logins
                SET password_hash = $1, updated_at = CURRENT_TIMESTAMP
                WHERE login_id = $2
            "#,
        )
        .bind(&new_hash)
        .bind(event.user_id.raw())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(())
    }

    async fn reset_password(&self, event: ResetPassword) -> AppResult<Option<String>> {
        let temporary = Uuid::new_v4().simple().to_string()[..10].to_string();
        let password_hash = bcrypt::hash(&temporary, bcrypt::DEFAULT_COST)?;

        // Lookup and replacement in one statement; zero rows means the
        // address is unknown and the caller answers as if it were not.
        let res = sqlx::query(
            r#"
                UPDATE logins
                SET password_hash = $1, updated_at = CURRENT_TIMESTAMP
                WHERE email = $2
            "#,
        )
        .bind(&password_hash)
        .bind(&event.email)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Ok(None);
        }

        Ok(Some(temporary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::role::Role;

    fn signup_event(email: &str) -> CreateUser {
        CreateUser::new(
            "Nimal Perera".into(),
            "12 Main St, Moratuwa".into(),
            "0771234567".into(),
            "Engineer".into(),
            "male".into(),
            email.into(),
            "s3cret".into(),
            None,
            Role::Accommodater,
        )
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn signup_creates_login_and_profile_together(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let login_id = repo.create(signup_event("nimal@example.com")).await?;

        let user = repo
            .find_current_user(login_id)
            .await?
            .expect("user should exist");
        assert_eq!(user.email, "nimal@example.com");
        assert_eq!(user.role, Role::Accommodater);
        assert!(!user.is_active);

        let profile = repo
            .find_profile_by_login_id(login_id)
            .await?
            .expect("profile should exist");
        assert_eq!(profile.full_name, "Nimal Perera");
        assert_eq!(profile.login_id, login_id);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn duplicate_email_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(signup_event("nimal@example.com")).await?;
        let res = repo.create(signup_event("nimal@example.com")).await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn activate_marks_email_verified(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let login_id = repo.create(signup_event("nimal@example.com")).await?;
        repo.activate(login_id).await?;

        let user = repo.find_current_user(login_id).await?.unwrap();
        assert!(user.is_active);

        let res = repo.activate(UserId::new()).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn update_password_verifies_the_current_one(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let login_id = repo.create(signup_event("nimal@example.com")).await?;

        let res = repo
            .update_password(UpdateUserPassword::new(
                login_id,
                "wrong".into(),
                "n3w-secret".into(),
            ))
            .await;
        assert!(matches!(res, Err(AppError::UnauthenticatedError)));

        repo.update_password(UpdateUserPassword::new(
            login_id,
            "s3cret".into(),
            "n3w-secret".into(),
        ))
        .await?;
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn reset_password_issues_a_working_temporary_one(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let login_id = repo.create(signup_event("nimal@example.com")).await?;
        let temporary = repo
            .reset_password(ResetPassword::new("nimal@example.com".into()))
            .await?
            .expect("known email should yield a temporary password");

        // The old password is gone, the temporary one verifies.
        let res = repo
            .update_password(UpdateUserPassword::new(
                login_id,
                "s3cret".into(),
                "n3w-secret".into(),
            ))
            .await;
        assert!(matches!(res, Err(AppError::UnauthenticatedError)));

        repo.update_password(UpdateUserPassword::new(
            login_id,
            temporary,
            "n3w-secret".into(),
        ))
        .await?;
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn reset_password_for_unknown_email_is_silent(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo
            .reset_password(ResetPassword::new("ghost@example.com".into()))
            .await?;
        assert!(res.is_none());
        Ok(())
    }
}
