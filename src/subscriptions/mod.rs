//! Change notifications for rendering collaborators.
//!
//! Collaborators that render a collection can subscribe instead of polling
//! the store. After each action that changes a collection, matching
//! subscribers receive a `StoreEvent::Changed` carrying the new version.
//! Buffers are bounded and a subscriber that falls behind is dropped.
//!
//! # Example
//!
//! ```ignore
//! let store = UserStore::new(StoreConfig::default());
//! let handle = store.subscribe(SubscriptionConfig::default());
//!
//! store.dispatch(Action::add(user))?;
//!
//! match handle.recv() {
//!     Ok(StoreEvent::Changed { version, .. }) => redraw(&store.snapshot()),
//!     Ok(StoreEvent::Dropped { .. }) | Err(_) => {}
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    Collection, DropReason, StoreEvent, SubscriptionConfig, SubscriptionFilter,
    SubscriptionHandle, SubscriptionId,
};
