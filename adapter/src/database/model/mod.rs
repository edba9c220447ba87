pub mod facility;
pub mod post;
pub mod user;
