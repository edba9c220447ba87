pub mod auth;
pub mod facility;
pub mod id;
pub mod post;
pub mod role;
pub mod user;
