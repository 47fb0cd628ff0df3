//! # User Registry
//!
//! An in-memory store of `User` records with live change subscriptions.
//!
//! - [`store::EntityStore`] holds the ordered collection and assigns ids.
//! - [`broadcaster::ChangeBroadcaster`] fans each post-mutation snapshot out
//!   to every registered subscriber.
//! - [`actor_framework::ResourceActor`] owns both and applies one request at
//!   a time, so a mutation and its publish are never interleaved with
//!   another request.
//! - [`clients::UserClient`] is the handle request handlers use;
//!   [`gateway`] maps HTTP onto it.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use user_registry::app_system::UserSystem;
//! use user_registry::config::ServiceConfig;
//! use user_registry::domain::UserInput;
//!
//! let system = UserSystem::new(&ServiceConfig::default());
//! let mut changes = system.user_client.subscribe_users().await?;
//!
//! let input = UserInput::new("Ada", "Lovelace", "ada@example.com", 36, "mathematician");
//! let user = system.user_client.create_user(input).await?;
//! assert_eq!(user.id, "1");
//!
//! let snapshot = changes.recv().await.unwrap();
//! assert_eq!(snapshot.len(), 1);
//!
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod broadcaster;
pub mod clients;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod store;
pub mod user_actor;

#[cfg(test)]
mod mock_framework;
