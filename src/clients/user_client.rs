use crate::actor_framework::ResourceClient;
use crate::domain::User;
use crate::impl_client_methods;
use crate::user_actor::UserError;

/// Client for interacting with the User actor.
///
/// This is the surface request handlers call: queries, mutations and the
/// `users` subscription.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

impl_client_methods!(UserClient, User, UserError, user, users);
