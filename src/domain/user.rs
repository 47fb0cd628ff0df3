use serde::{Deserialize, Serialize};

/// Represents a registered user in the system.
///
/// # Actor Framework
/// This struct implements the [`Entity`](crate::actor_framework::Entity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::actor_framework::ResourceActor).
/// The `id` is assigned by the store and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub age: u32,
    pub profession: String,
}

/// Every user field except `id`. Used for both create and update; an update
/// replaces all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub age: u32,
    pub profession: String,
}

impl UserInput {
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
        age: u32,
        profession: impl Into<String>,
    ) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
            email: email.into(),
            age,
            profession: profession.into(),
        }
    }
}
