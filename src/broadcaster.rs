//! Typed fan-out of collection snapshots to live subscribers.

use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::store::Snapshot;

/// Opaque registration token for one subscription stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub_{}", self.0)
    }
}

/// Registry of subscribers, each with its own bounded queue.
///
/// `publish` never waits on a subscriber: a full queue means the subscriber
/// is not keeping up and it is dropped, a closed queue means the receiving
/// side went away. Either way the publisher sees no error.
pub struct ChangeBroadcaster<T> {
    subscribers: HashMap<SubscriberId, mpsc::Sender<Snapshot<T>>>,
    next_id: u64,
    capacity: usize,
}

impl<T> ChangeBroadcaster<T> {
    /// `capacity` is the per-subscriber queue length; zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            subscribers: HashMap::new(),
            next_id: 1,
            capacity: capacity.max(1),
        }
    }

    /// Subscribers whose receiving side is still open.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .values()
            .filter(|sender| !sender.is_closed())
            .count()
    }

    /// Registers a subscriber. It sees only snapshots published from now on.
    ///
    /// Entries whose `Subscription` was dropped are removed first, so the
    /// registry does not grow while no mutations happen.
    pub fn subscribe(&mut self) -> Subscription<T> {
        self.prune_closed();

        let id = SubscriberId(self.next_id);
        self.next_id += 1;

        let (sender, receiver) = mpsc::channel(self.capacity);
        self.subscribers.insert(id, sender);
        debug!(subscriber_id = %id, subscriber_count = self.subscribers.len(), "Subscriber registered");

        Subscription { id, receiver }
    }

    /// Deregisters a subscriber. Returns false if it was already gone.
    ///
    /// Snapshots already queued for it are still readable; the stream ends
    /// after them.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let removed = self.subscribers.remove(&id).is_some();
        debug!(subscriber_id = %id, removed, "Subscriber unregistered");
        removed
    }

    /// Entries in the registry, closed or not.
    #[cfg(test)]
    pub(crate) fn registered(&self) -> usize {
        self.subscribers.len()
    }

    fn prune_closed(&mut self) {
        self.subscribers.retain(|id, sender| {
            let open = !sender.is_closed();
            if !open {
                debug!(subscriber_id = %id, "Subscriber disconnected");
            }
            open
        });
    }

    /// Queues `snapshot` for every registered subscriber and returns how many
    /// accepted it.
    pub fn publish(&mut self, snapshot: Snapshot<T>) -> usize {
        let mut delivered = 0;

        self.subscribers.retain(|id, sender| {
            match sender.try_send(snapshot.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(TrySendError::Full(_)) => {
                    warn!(subscriber_id = %id, "Subscriber queue full, dropping subscriber");
                    false
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(subscriber_id = %id, "Subscriber disconnected");
                    false
                }
            }
        });

        debug!(delivered, subscriber_count = self.subscribers.len(), "Snapshot published");
        delivered
    }
}

/// Receiving half of one registration.
///
/// Dropping it is the same as the owning connection closing: the
/// broadcaster prunes the entry on its next publish or subscribe.
pub struct Subscription<T> {
    id: SubscriberId,
    receiver: mpsc::Receiver<Snapshot<T>>,
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl<T> Subscription<T> {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Next snapshot, or `None` once the subscription has been deregistered
    /// and its queue drained.
    pub async fn recv(&mut self) -> Option<Snapshot<T>> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Snapshot<T>> {
        self.receiver.try_recv().ok()
    }
}

impl<T> Stream for Subscription<T> {
    type Item = Snapshot<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::Arc;
    use tokio::time::{timeout, Duration};

    fn snap(values: &[u32]) -> Snapshot<u32> {
        Arc::from(values)
    }

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let mut broadcaster = ChangeBroadcaster::new(8);
        let mut a = broadcaster.subscribe();
        let mut b = broadcaster.subscribe();
        assert_ne!(a.id(), b.id());

        assert_eq!(broadcaster.publish(snap(&[1])), 2);

        assert_eq!(&*a.recv().await.unwrap(), &[1]);
        assert_eq!(&*b.recv().await.unwrap(), &[1]);
    }

    #[tokio::test]
    async fn test_delivery_order_matches_publish_order() {
        let mut broadcaster = ChangeBroadcaster::new(8);
        let mut sub = broadcaster.subscribe();

        broadcaster.publish(snap(&[1]));
        broadcaster.publish(snap(&[1, 2]));
        broadcaster.publish(snap(&[2]));

        assert_eq!(&*sub.recv().await.unwrap(), &[1]);
        assert_eq!(&*sub.recv().await.unwrap(), &[1, 2]);
        assert_eq!(&*sub.recv().await.unwrap(), &[2]);
    }

    #[tokio::test]
    async fn test_late_subscriber_gets_no_backlog() {
        let mut broadcaster = ChangeBroadcaster::new(8);
        broadcaster.publish(snap(&[1]));

        let mut late = broadcaster.subscribe();
        assert!(late.try_recv().is_none());

        broadcaster.publish(snap(&[1, 2]));
        assert_eq!(&*late.recv().await.unwrap(), &[1, 2]);
    }

    #[tokio::test]
    async fn test_unsubscribe_drains_queue_then_ends() {
        let mut broadcaster = ChangeBroadcaster::new(8);
        let mut sub = broadcaster.subscribe();

        broadcaster.publish(snap(&[1]));
        assert!(broadcaster.unsubscribe(sub.id()));
        assert!(!broadcaster.unsubscribe(sub.id()));
        assert_eq!(broadcaster.publish(snap(&[1, 2])), 0);

        assert_eq!(&*sub.recv().await.unwrap(), &[1]);
        let end = timeout(Duration::from_millis(50), sub.recv()).await;
        assert_eq!(end, Ok(None));
    }

    #[tokio::test]
    async fn test_dropped_subscription_is_pruned() {
        let mut broadcaster = ChangeBroadcaster::new(8);
        let gone = broadcaster.subscribe();
        let mut alive = broadcaster.subscribe();
        drop(gone);

        assert_eq!(broadcaster.publish(snap(&[7])), 1);
        assert_eq!(broadcaster.subscriber_count(), 1);
        assert_eq!(&*alive.recv().await.unwrap(), &[7]);
    }

    #[tokio::test]
    async fn test_dropped_subscriptions_unregister_without_publish() {
        let mut broadcaster = ChangeBroadcaster::<u32>::new(8);
        for _ in 0..1000 {
            drop(broadcaster.subscribe());
        }
        assert_eq!(broadcaster.subscriber_count(), 0);
        assert!(broadcaster.registered() <= 1);

        let mut kept = broadcaster.subscribe();
        drop(broadcaster.subscribe());
        let _next = broadcaster.subscribe();

        // only the closed entries were swept, the live ones stay
        assert_eq!(broadcaster.registered(), 2);
        assert_eq!(broadcaster.subscriber_count(), 2);

        assert_eq!(broadcaster.publish(snap(&[1])), 2);
        assert_eq!(&*kept.recv().await.unwrap(), &[1]);
    }

    #[tokio::test]
    async fn test_full_queue_drops_only_slow_subscriber() {
        let mut broadcaster = ChangeBroadcaster::new(2);
        let mut slow = broadcaster.subscribe();
        let mut fast = broadcaster.subscribe();

        broadcaster.publish(snap(&[1]));
        broadcaster.publish(snap(&[2]));
        assert_eq!(&*fast.recv().await.unwrap(), &[1]);
        assert_eq!(&*fast.recv().await.unwrap(), &[2]);

        // slow never read, its queue of two is full
        assert_eq!(broadcaster.publish(snap(&[3])), 1);
        assert_eq!(broadcaster.subscriber_count(), 1);
        assert_eq!(&*fast.recv().await.unwrap(), &[3]);

        let received: Vec<_> = (&mut slow).collect().await;
        assert_eq!(received.len(), 2);
    }

    #[tokio::test]
    async fn test_subscription_as_stream() {
        let mut broadcaster = ChangeBroadcaster::new(8);
        let sub = broadcaster.subscribe();
        let id = sub.id();

        broadcaster.publish(snap(&[1]));
        broadcaster.publish(snap(&[2]));
        broadcaster.unsubscribe(id);

        let items: Vec<Vec<u32>> = sub.map(|s| s.to_vec()).collect().await;
        assert_eq!(items, vec![vec![1], vec![2]]);
    }
}
