//! System orchestration, startup, and shutdown logic.

pub mod error;
pub mod tracing;
pub mod user_system;

pub use self::tracing::*;
pub use error::*;
pub use user_system::*;
