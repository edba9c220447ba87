use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::id::UserId;
use crate::model::user::{
    event::{CreateUser, ResetPassword, UpdateUserPassword},
    OwnerProfile, User,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the login record and its owner profile in one transaction.
    async fn create(&self, event: CreateUser) -> AppResult<UserId>;
    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
    /// Resolves a login id to the owner profile created alongside it.
    async fn find_profile_by_login_id(&self, login_id: UserId) -> AppResult<Option<OwnerProfile>>;
    /// Marks the account's email address as verified.
    async fn activate(&self, user_id: UserId) -> AppResult<()>;
    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()>;
    /// Replaces the password with a generated temporary one. Returns the
    /// temporary password when the email is known and `None` otherwise;
    /// unknown addresses must stay indistinguishable to the caller.
    async fn reset_password(&self, event: ResetPassword) -> AppResult<Option<String>>;
}
