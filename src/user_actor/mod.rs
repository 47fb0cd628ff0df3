//! User-specific wiring for the generic actor framework.

pub mod entity;
pub mod error;

pub use error::*;
