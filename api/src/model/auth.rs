use garde::Validate;
use serde::{Deserialize, Serialize};

use kernel::model::id::UserId;

use crate::model::user::RoleName;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 4))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: RoleName,
    pub avatar: Option<String>,
    pub access_token: String,
    pub token_type: String,
}
