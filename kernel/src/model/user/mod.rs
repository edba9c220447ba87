pub mod event;

use crate::model::id::{ProfileId, UserId};
use crate::model::role::Role;

/// Login-credential side of an account.
#[derive(Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub is_active: bool,
}

/// Profile record for a user; listings reference this, not the login.
#[derive(Debug)]
pub struct OwnerProfile {
    pub profile_id: ProfileId,
    pub login_id: UserId,
    pub full_name: String,
    pub address: String,
    pub phone: String,
    pub occupation: String,
    pub gender: String,
}

/// Contact attributes exposed alongside a listing detail.
#[derive(Debug)]
pub struct OwnerContact {
    pub profile_id: ProfileId,
    pub full_name: String,
    pub address: String,
    pub phone: String,
    pub occupation: String,
    pub gender: String,
}
