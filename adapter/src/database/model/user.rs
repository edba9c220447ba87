use std::str::FromStr;

use kernel::model::role::Role;
use kernel::model::user::{OwnerProfile, User};
use shared::error::AppError;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub login_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: Option<String>,
    pub is_active: bool,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            login_id,
            name,
            email,
            role,
            avatar,
            is_active,
        } = value;
        Ok(User {
            user_id: login_id.into(),
            name,
            email,
            role: Role::from_str(&role)
                .map_err(|_| AppError::ConversionEntityError(format!("role `{role}`")))?,
            avatar,
            is_active,
        })
    }
}

/// Minimal credential row fetched for password verification.
#[derive(sqlx::FromRow)]
pub struct LoginCredentialRow {
    pub login_id: Uuid,
    pub password_hash: String,
    pub is_active: bool,
}

#[derive(sqlx::FromRow)]
pub struct OwnerProfileRow {
    pub profile_id: Uuid,
    pub login_id: Uuid,
    pub full_name: String,
    pub address: String,
    pub phone: String,
    pub occupation: String,
    pub gender: String,
}

impl From<OwnerProfileRow> for OwnerProfile {
    fn from(value: OwnerProfileRow) -> Self {
        let OwnerProfileRow {
            profile_id,
            login_id,
            full_name,
            address,
            phone,
            occupation,
            gender,
        } = value;
        OwnerProfile {
            profile_id: profile_id.into(),
            login_id: login_id.into(),
            full_name,
            address,
            phone,
            occupation,
            gender,
        }
    }
}
