pub mod config;
pub mod datetime;
pub mod env;
pub mod error;
