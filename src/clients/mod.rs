//! Typed clients over the generic resource actor.

pub mod macros;
pub mod user_client;

pub use user_client::*;
