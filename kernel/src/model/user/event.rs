use derive_new::new;

use crate::model::id::UserId;
use crate::model::role::Role;

#[derive(new)]
pub struct CreateUser {
    pub full_name: String,
    pub address: String,
    pub phone: String,
    pub occupation: String,
    pub gender: String,
    pub email: String,
    pub password: String,
    pub avatar: Option<String>,
    pub role: Role,
}

#[derive(new)]
pub struct UpdateUserPassword {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
}

#[derive(new)]
pub struct ResetPassword {
    pub email: String,
}
