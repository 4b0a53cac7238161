//! The user store: current snapshot, dispatch, and notifications.

use crate::actions::{self, Action};
use crate::error::Result;
use crate::ids::{IdGenerator, IdStrategy};
use crate::subscriptions::{
    Collection, SubscriptionConfig, SubscriptionHandle, SubscriptionId, SubscriptionManager,
};
use crate::types::{Sequence, UserId, UserList};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// How fresh user ids are generated.
    pub id_strategy: IdStrategy,

    /// Default buffer size for subscriptions opened with `subscribe_default`.
    /// Zero is raised to 1.
    pub subscriber_buffer: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::Timestamp,
            subscriber_buffer: 1000,
        }
    }
}

/// Result of a successful dispatch.
#[derive(Clone, Debug)]
pub enum DispatchOutcome {
    /// The action produced a different snapshot.
    Changed {
        version: Sequence,
        snapshot: Arc<UserList>,
    },
    /// The action matched nothing; the snapshot is equal to the previous one.
    Unchanged {
        version: Sequence,
        snapshot: Arc<UserList>,
    },
}

impl DispatchOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, DispatchOutcome::Changed { .. })
    }

    pub fn version(&self) -> Sequence {
        match self {
            DispatchOutcome::Changed { version, .. } | DispatchOutcome::Unchanged { version, .. } => {
                *version
            }
        }
    }

    pub fn snapshot(&self) -> &Arc<UserList> {
        match self {
            DispatchOutcome::Changed { snapshot, .. }
            | DispatchOutcome::Unchanged { snapshot, .. } => snapshot,
        }
    }
}

struct Current {
    version: Sequence,
    snapshot: Arc<UserList>,
}

/// Holds the user collection and applies actions to it one at a time.
///
/// Readers get `Arc<UserList>` snapshots that never change underneath them.
/// The store is meant to be built once and passed by reference to whatever
/// renders or edits the collection.
pub struct UserStore {
    config: StoreConfig,
    current: RwLock<Current>,
    ids: Box<dyn IdGenerator>,
    subscriptions: SubscriptionManager,
}

impl UserStore {
    /// Create an empty store.
    pub fn new(config: StoreConfig) -> Self {
        let ids = config.id_strategy.build();
        Self::with_id_generator(config, ids)
    }

    /// Create an empty store with a custom id generator.
    pub fn with_id_generator(config: StoreConfig, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            config,
            current: RwLock::new(Current {
                version: Sequence::default(),
                snapshot: Arc::new(UserList::new()),
            }),
            ids,
            subscriptions: SubscriptionManager::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<UserList> {
        Arc::clone(&self.current.read().snapshot)
    }

    /// Number of actions applied so far.
    pub fn version(&self) -> Sequence {
        self.current.read().version
    }

    /// Generate an id for a user about to be added.
    pub fn next_id(&self) -> UserId {
        self.ids.next_id()
    }

    /// Apply one action and publish the resulting snapshot.
    pub fn dispatch(&self, action: Action) -> Result<DispatchOutcome> {
        let kind = action.kind();
        let target = action.target().clone();

        let outcome = {
            let mut current = self.current.write();
            let next = actions::apply(&current.snapshot, action);
            let changed = next != *current.snapshot;

            current.version = current.version.next();
            let version = current.version;

            if changed {
                current.snapshot = Arc::new(next);
                let snapshot = Arc::clone(&current.snapshot);
                // Published under the write lock so events arrive in version order
                self.subscriptions
                    .broadcast_changed(Collection::Users, version, snapshot.len());
                DispatchOutcome::Changed { version, snapshot }
            } else {
                let snapshot = Arc::clone(&current.snapshot);
                DispatchOutcome::Unchanged { version, snapshot }
            }
        };

        debug!(
            action = kind,
            id = %target,
            version = outcome.version().0,
            changed = outcome.changed(),
            "dispatched action"
        );

        Ok(outcome)
    }

    /// Decode a raw JSON action and dispatch it.
    ///
    /// Unsupported kinds fail with `StoreError::InvalidAction` and leave the
    /// store exactly as it was, version included.
    pub fn dispatch_json(&self, raw: &str) -> Result<DispatchOutcome> {
        let action = Action::from_json(raw).map_err(|e| {
            warn!(error = %e, "rejected raw action");
            e
        })?;
        self.dispatch(action)
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.subscriptions.subscribe(config)
    }

    /// Subscribe using the store's configured buffer size.
    pub fn subscribe_default(&self) -> SubscriptionHandle {
        self.subscriptions.subscribe(SubscriptionConfig {
            buffer_size: self.config.subscriber_buffer,
            ..Default::default()
        })
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.unsubscribe(id);
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.subscription_count()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
