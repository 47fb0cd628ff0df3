use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during user operations.
///
/// A missing user is not an error; lookups return `None` for that.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for UserError {
    fn from(err: FrameworkError) -> Self {
        UserError::ActorCommunicationError(err.to_string())
    }
}
