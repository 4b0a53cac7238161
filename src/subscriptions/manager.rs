//! Subscription manager for broadcasting change events.

use crate::types::Sequence;
use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use super::types::{
    Collection, DropReason, StoreEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
};

/// What happened to one send attempt.
enum Delivery {
    Sent,
    Overflow,
    Disconnected,
}

/// Internal subscription state.
struct Subscription {
    config: SubscriptionConfig,
    /// Events a subscriber may have pending. The channel holds one more
    /// slot, kept free for the `Dropped` notice.
    capacity: usize,
    sender: Sender<StoreEvent>,
}

impl Subscription {
    fn try_send(&self, event: StoreEvent) -> Delivery {
        if self.sender.len() >= self.capacity {
            return Delivery::Overflow;
        }
        match self.sender.try_send(event) {
            Ok(()) => Delivery::Sent,
            Err(TrySendError::Full(_)) => Delivery::Overflow,
            Err(TrySendError::Disconnected(_)) => Delivery::Disconnected,
        }
    }
}

/// Manages subscriptions and broadcasts events.
pub struct SubscriptionManager {
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    next_id: AtomicU64,
}

impl SubscriptionManager {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a new subscription.
    ///
    /// A `buffer_size` of 0 is treated as 1.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let capacity = config.buffer_size.max(1);
        let (sender, receiver) = bounded(capacity + 1);

        self.subscriptions.write().insert(
            id,
            Subscription {
                config,
                capacity,
                sender,
            },
        );

        SubscriptionHandle { id, receiver }
    }

    /// Unsubscribe and clean up.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subs = self.subscriptions.write();
        if let Some(sub) = subs.remove(&id) {
            // Best effort
            let _ = sub.sender.try_send(StoreEvent::Dropped {
                reason: DropReason::Unsubscribed,
            });
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Broadcast a new snapshot version to matching subscriptions.
    pub fn broadcast_changed(&self, collection: Collection, version: Sequence, len: usize) {
        let event = StoreEvent::Changed {
            collection,
            version,
            len,
        };

        let mut overflowed = Vec::new();
        let mut disconnected = Vec::new();
        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                if !sub.config.filter.matches(collection) {
                    continue;
                }
                match sub.try_send(event.clone()) {
                    Delivery::Sent => {}
                    Delivery::Overflow => overflowed.push(*id),
                    Delivery::Disconnected => disconnected.push(*id),
                }
            }
        }

        if overflowed.is_empty() && disconnected.is_empty() {
            return;
        }

        let mut subs = self.subscriptions.write();
        for id in overflowed {
            if let Some(sub) = subs.remove(&id) {
                warn!(subscription = id.0, "dropping slow subscriber");
                // Goes into the reserved slot
                let _ = sub.sender.try_send(StoreEvent::Dropped {
                    reason: DropReason::BufferOverflow,
                });
            }
        }
        for id in disconnected {
            if subs.remove(&id).is_some() {
                debug!(subscription = id.0, "removing disconnected subscriber");
            }
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscriptions::SubscriptionFilter;
    use std::time::Duration;

    #[test]
    fn test_subscribe_unsubscribe() {
        let manager = SubscriptionManager::new();

        let handle = manager.subscribe(SubscriptionConfig::default());
        assert_eq!(manager.subscription_count(), 1);

        manager.unsubscribe(handle.id);
        assert_eq!(manager.subscription_count(), 0);

        let event = handle.recv_timeout(Duration::from_millis(100)).unwrap();
        assert_eq!(
            event,
            StoreEvent::Dropped {
                reason: DropReason::Unsubscribed
            }
        );
    }

    #[test]
    fn test_broadcast_to_matching() {
        let manager = SubscriptionManager::new();
        let handle = manager.subscribe(SubscriptionConfig {
            filter: SubscriptionFilter::only(Collection::Users),
            ..Default::default()
        });

        manager.broadcast_changed(Collection::Users, Sequence(1), 3);

        let event = handle.recv_timeout(Duration::from_millis(100)).unwrap();
        assert_eq!(
            event,
            StoreEvent::Changed {
                collection: Collection::Users,
                version: Sequence(1),
                len: 3
            }
        );
    }

    #[test]
    fn test_broadcast_filters_non_matching() {
        let manager = SubscriptionManager::new();
        let handle = manager.subscribe(SubscriptionConfig {
            filter: SubscriptionFilter::only(Collection::Users),
            ..Default::default()
        });

        manager.broadcast_changed(Collection::Students, Sequence(1), 1);

        let result = handle.recv_timeout(Duration::from_millis(50));
        assert!(result.is_err());
    }

    #[test]
    fn test_drop_slow_subscriber() {
        let manager = SubscriptionManager::new();
        let handle = manager.subscribe(SubscriptionConfig {
            buffer_size: 2,
            ..Default::default()
        });

        for i in 1..=10 {
            manager.broadcast_changed(Collection::Users, Sequence(i), i as usize);
        }

        assert_eq!(manager.subscription_count(), 0);

        let events = handle.drain();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0],
            StoreEvent::Changed {
                version: Sequence(1),
                ..
            }
        ));
        assert!(matches!(
            events[1],
            StoreEvent::Changed {
                version: Sequence(2),
                ..
            }
        ));
        assert_eq!(
            events[2],
            StoreEvent::Dropped {
                reason: DropReason::BufferOverflow
            }
        );
    }

    #[test]
    fn test_zero_buffer_holds_one_event() {
        let manager = SubscriptionManager::new();
        let handle = manager.subscribe(SubscriptionConfig {
            buffer_size: 0,
            ..Default::default()
        });

        manager.broadcast_changed(Collection::Users, Sequence(1), 1);

        assert_eq!(manager.subscription_count(), 1);
        assert_eq!(
            handle.try_recv().unwrap(),
            StoreEvent::Changed {
                collection: Collection::Users,
                version: Sequence(1),
                len: 1
            }
        );
    }

    #[test]
    fn test_closed_receiver_removed_without_overflow() {
        let manager = SubscriptionManager::new();
        let handle = manager.subscribe(SubscriptionConfig::default());
        drop(handle);

        manager.broadcast_changed(Collection::Users, Sequence(1), 1);

        assert_eq!(manager.subscription_count(), 0);
    }
}
