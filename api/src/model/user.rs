use derive_new::new;
use garde::Validate;
use serde::{Deserialize, Serialize};

use kernel::model::id::{ProfileId, UserId};
use kernel::model::role::Role;
use kernel::model::user::{
    event::{CreateUser, ResetPassword, UpdateUserPassword},
    OwnerContact, OwnerProfile, User,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Admin,
    Moderator,
    Client,
    Accommodater,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::Moderator => Self::Moderator,
            Role::Client => Self::Client,
            Role::Accommodater => Self::Accommodater,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Admin => Self::Admin,
            RoleName::Moderator => Self::Moderator,
            RoleName::Client => Self::Client,
            RoleName::Accommodater => Self::Accommodater,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[garde(length(min = 1))]
    pub full_name: String,
    #[garde(length(min = 1))]
    pub address: String,
    #[garde(length(min = 1))]
    pub phone: String,
    #[garde(length(min = 1))]
    pub occupation: String,
    #[garde(length(min = 1))]
    pub gender: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 4))]
    pub password: String,
    #[garde(skip)]
    pub avatar: Option<String>,
}

impl SignupRequest {
    pub fn into_event(self, role: Role) -> CreateUser {
        CreateUser::new(
            self.full_name,
            self.address,
            self.phone,
            self.occupation,
            self.gender,
            self.email,
            self.password,
            self.avatar,
            role,
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub user_id: UserId,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[garde(email)]
    pub email: String,
}

impl From<ResetPasswordRequest> for ResetPassword {
    fn from(value: ResetPasswordRequest) -> Self {
        Self::new(value.email)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPasswordRequest {
    #[garde(length(min = 4))]
    pub current_password: String,
    #[garde(length(min = 4))]
    pub new_password: String,
}

#[derive(Debug, new)]
pub struct UpdateUserPasswordRequestWithUserId(pub UserId, pub UpdateUserPasswordRequest);

impl From<UpdateUserPasswordRequestWithUserId> for UpdateUserPassword {
    fn from(value: UpdateUserPasswordRequestWithUserId) -> Self {
        let UpdateUserPasswordRequestWithUserId(user_id, request) = value;
        Self::new(user_id, request.current_password, request.new_password)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: RoleName,
    pub avatar: Option<String>,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            name,
            email,
            role,
            avatar,
            is_active,
        } = value;
        Self {
            user_id,
            name,
            email,
            role: role.into(),
            avatar,
            is_active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub items: Vec<UserResponse>,
}

impl From<Vec<User>> for UsersResponse {
    fn from(value: Vec<User>) -> Self {
        Self {
            items: value.into_iter().map(UserResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfileResponse {
    pub profile_id: ProfileId,
    pub login_id: UserId,
    pub full_name: String,
    pub address: String,
    pub phone: String,
    pub occupation: String,
    pub gender: String,
}

impl From<OwnerProfile> for OwnerProfileResponse {
    fn from(value: OwnerProfile) -> Self {
        let OwnerProfile {
            profile_id,
            login_id,
            full_name,
            address,
            phone,
            occupation,
            gender,
        } = value;
        Self {
            profile_id,
            login_id,
            full_name,
            address,
            phone,
            occupation,
            gender,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerContactResponse {
    pub profile_id: ProfileId,
    pub full_name: String,
    pub address: String,
    pub phone: String,
    pub occupation: String,
    pub gender: String,
}

impl From<OwnerContact> for OwnerContactResponse {
    fn from(value: OwnerContact) -> Self {
        let OwnerContact {
            profile_id,
            full_name,
            address,
            phone,
            occupation,
            gender,
        } = value;
        Self {
            profile_id,
            full_name,
            address,
            phone,
            occupation,
            gender,
        }
    }
}
