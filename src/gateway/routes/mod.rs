//! HTTP route handlers.

pub mod health;
pub mod subscription;
pub mod users;
