use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use kernel::model::auth::{event::CreateToken, AccessToken};
use kernel::model::id::UserId;
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

use crate::database::model::user::LoginCredentialRow;
use crate::database::ConnectionPool;
use crate::redis::RedisClient;

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(&self, token: &AccessToken) -> AppResult<Option<UserId>> {
        let Some(value) = self.kv.get(&token.0).await? else {
            return Ok(None);
        };
        let user_id = Uuid::parse_str(&value)?;
        Ok(Some(user_id.into()))
    }

    async fn verify_user(&self, event: CreateToken) -> AppResult<UserId> {
        let row: Option<LoginCredentialRow> = sqlx::query_as(
            r#"
                SELECT login_id, password_hash, is_active
                FROM logins
                WHERE email = $1
            "#,
        )
        .bind(&event.email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::UnauthenticatedError);
        };

        if !bcrypt::verify(&event.password, &row.password_hash)? {
            return Err(AppError::UnauthenticatedError);
        }

        if !row.is_active {
            return Err(AppError::UnprocessableEntity(
                "please verify your email first".into(),
            ));
        }

        Ok(row.login_id.into())
    }

    async fn create_token(&self, user_id: UserId) -> AppResult<AccessToken> {
        let token = Uuid::new_v4().simple().to_string();
        self.kv
            .set_ex(&token, &user_id.raw().to_string(), self.ttl)
            .await?;
        Ok(AccessToken(token))
    }

    async fn delete_token(&self, token: AccessToken) -> AppResult<()> {
        self.kv.delete(&token.0).await
    }
}
