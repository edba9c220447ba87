pub mod auth;
pub mod facility;
pub mod health;
pub mod post;
pub mod user;
pub mod v1;
