pub mod mailer;
pub mod model;
pub mod repository;
pub mod storage;
