//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then the
//! `expect_*` helpers to pull the next request off the receiver and answer
//! it by hand.

use tokio::sync::mpsc;

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};
use crate::broadcaster::{SubscriberId, Subscription};

/// Creates a client whose requests land on a receiver the test controls.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Input, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { input, respond_to }) => Some((input, respond_to)),
        _ => None,
    }
}

pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Input, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, input, respond_to }) => Some((id, input, respond_to)),
        _ => None,
    }
}

pub async fn expect_subscribe<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<Subscription<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::Subscribe { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_unsubscribe<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(SubscriberId, Response<bool>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Unsubscribe { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{User, UserInput};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<User>(10);

        let create_task = tokio::spawn(async move {
            let input = UserInput::new("Test", "User", "test@example.com", 20, "qa");
            client.create(input).await
        });

        let (input, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(input.firstname, "Test");
        let user = User::from_input("1".to_string(), input);
        responder.send(Ok(user.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(user));
    }
}
