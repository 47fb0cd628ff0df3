use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use super::SystemError;
use crate::actor_framework::ResourceActor;
use crate::clients::UserClient;
use crate::config::ServiceConfig;
use crate::domain::User;

/// Owns the running user actor.
///
/// Each instance has its own store and subscriber registry, so tests can run
/// several side by side.
pub struct UserSystem {
    pub user_client: UserClient,
    handle: JoinHandle<()>,
}

impl UserSystem {
    /// Spawn the user actor. Must be called from within a tokio runtime.
    #[instrument(name = "user_system", skip(config))]
    pub fn new(config: &ServiceConfig) -> Self {
        info!(
            channel_buffer = config.channel_buffer,
            subscriber_capacity = config.subscriber_capacity,
            "Starting user system"
        );

        let (user_actor, resource_client) =
            ResourceActor::<User>::new(config.channel_buffer, config.subscriber_capacity);
        let handle = tokio::spawn(user_actor.run());

        Self {
            user_client: UserClient::new(resource_client),
            handle,
        }
    }

    /// Stop the actor and wait for it. Live subscription streams end cleanly.
    ///
    /// Safe to call after [`UserClient::shutdown`] was already sent.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down user system");

        // The actor may already be gone if a shutdown was sent earlier
        let _ = self.user_client.shutdown().await;

        if let Err(e) = self.handle.await {
            error!(error = ?e, "User actor task failed");
            return Err(SystemError::ActorTaskFailed(e.to_string()));
        }

        info!("User system shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserInput;

    #[tokio::test]
    async fn test_systems_are_independent() -> Result<(), Box<dyn std::error::Error>> {
        let config = ServiceConfig::default();
        let first = UserSystem::new(&config);
        let second = UserSystem::new(&config);

        let input = UserInput::new("A", "B", "a@b.com", 30, "eng");
        first.user_client.create_user(input.clone()).await?;
        first.user_client.create_user(input.clone()).await?;
        let created = second.user_client.create_user(input).await?;

        assert_eq!(created.id, "1");
        assert_eq!(first.user_client.get_users().await?.len(), 2);
        assert_eq!(second.user_client.get_users().await?.len(), 1);

        first.shutdown().await?;
        second.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_shutdown_terminates_subscriptions() -> Result<(), Box<dyn std::error::Error>> {
        let system = UserSystem::new(&ServiceConfig::default());
        let mut subscription = system.user_client.subscribe_users().await?;

        system.shutdown().await?;
        assert!(subscription.recv().await.is_none());
        Ok(())
    }
}
