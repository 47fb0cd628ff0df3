use std::fmt::{Debug, Display};

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

use crate::broadcaster::{ChangeBroadcaster, SubscriberId, Subscription};
use crate::store::{EntityStore, Snapshot};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Clone + Send + Sync + Display + Debug;
    /// Every field except the id. Used for both create and update.
    type Input: Send + Sync + Debug;

    fn id(&self) -> &Self::Id;

    /// Turn the store's sequence number into an id.
    fn assign_id(seq: u64) -> Self::Id;

    fn from_input(id: Self::Id, input: Self::Input) -> Self;

    /// Overwrite all input fields. Must not touch the id.
    fn apply_input(&mut self, input: Self::Input);
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        input: T::Input,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        input: T::Input,
        respond_to: Response<Option<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Subscribe {
        respond_to: Response<Subscription<T>>,
    },
    Unsubscribe {
        id: SubscriberId,
        respond_to: Response<bool>,
    },
    Shutdown,
    #[cfg(test)]
    SubscriberCount {
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns the store and the broadcaster.
///
/// Requests are handled one at a time, so a mutation and the publish of its
/// snapshot form one step that no other request can interleave with.
/// Publishing only enqueues, so subscribers never hold up the next request.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: EntityStore<T>,
    broadcaster: ChangeBroadcaster<T>,
}

impl<T: Entity> ResourceActor<T> {
    /// `buffer_size` is the request queue length; zero is bumped to one.
    pub fn new(buffer_size: usize, subscriber_capacity: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self {
            receiver,
            store: EntityStore::new(),
            broadcaster: ChangeBroadcaster::new(subscriber_capacity),
        };
        (actor, ResourceClient::new(sender))
    }

    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { input, respond_to } => {
                    let item = self.store.create(input);
                    debug!(id = %item.id(), "Created");
                    self.notify();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.list()));
                }
                ResourceRequest::Update { id, input, respond_to } => {
                    let item = self.store.update(&id, input);
                    match &item {
                        Some(_) => {
                            debug!(%id, "Updated");
                            self.notify();
                        }
                        None => debug!(%id, "Update target not found"),
                    }
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let item = self.store.delete(&id);
                    match &item {
                        Some(_) => {
                            debug!(%id, "Deleted");
                            self.notify();
                        }
                        None => debug!(%id, "Delete target not found"),
                    }
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Subscribe { respond_to } => {
                    let subscription = self.broadcaster.subscribe();
                    if let Err(Ok(subscription)) = respond_to.send(Ok(subscription)) {
                        // caller went away before getting its handle
                        self.broadcaster.unsubscribe(subscription.id());
                    }
                }
                ResourceRequest::Unsubscribe { id, respond_to } => {
                    let removed = self.broadcaster.unsubscribe(id);
                    let _ = respond_to.send(Ok(removed));
                }
                ResourceRequest::Shutdown => {
                    info!("ResourceActor shutting down");
                    break;
                }
                #[cfg(test)]
                ResourceRequest::SubscriberCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.broadcaster.registered()));
                }
            }
        }

        info!(
            subscriber_count = self.broadcaster.subscriber_count(),
            "ResourceActor stopped"
        );
    }

    fn notify(&mut self) {
        let snapshot: Snapshot<T> = self.store.snapshot();
        self.broadcaster.publish(snapshot);
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, input: T::Input) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { input, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, input: T::Input) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, input, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn subscribe(&self) -> Result<Subscription<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Subscribe { respond_to })
            .await
    }

    pub async fn unsubscribe(&self, id: SubscriberId) -> Result<bool, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Unsubscribe { id, respond_to })
            .await
    }

    #[cfg(test)]
    pub async fn subscriber_count(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::SubscriberCount { respond_to })
            .await
    }

    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }
}

// =============================================================================
// 5. TESTS
// =============================================================================
