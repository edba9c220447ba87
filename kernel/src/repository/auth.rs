use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::auth::{event::CreateToken, AccessToken};
use crate::model::id::UserId;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn fetch_user_id_from_token(&self, token: &AccessToken) -> AppResult<Option<UserId>>;
    async fn verify_user(&self, event: CreateToken) -> AppResult<UserId>;
    async fn create_token(&self, user_id: UserId) -> AppResult<AccessToken>;
    async fn delete_token(&self, token: AccessToken) -> AppResult<()>;
}
