//! # Roster
//!
//! In-memory record collections driven by discrete actions, with every
//! action producing a new immutable snapshot.
//!
//! ## Core Concepts
//!
//! - **Users**: keyed by id; mutated through `Add`, `Update` and `Delete`
//! - **Students**: append-only rows with no identity key
//! - **Snapshots**: `Arc`-shared collection states that never change
//! - **Drafts**: form input assembled into records
//!
//! ## Example
//!
//! ```ignore
//! use roster::{Action, StoreConfig, UserDraft, UserStore};
//!
//! let store = UserStore::new(StoreConfig::default());
//!
//! let mut draft = UserDraft { name: "Ann".into(), email: "a@x.com".into() };
//! let action = draft.submit(&roster::TimestampIds::new())?;
//! store.dispatch(action)?;
//!
//! let id = store.snapshot().users[0].id.clone();
//! store.dispatch(Action::delete(id))?;
//! ```

pub mod actions;
pub mod error;
pub mod forms;
pub mod ids;
pub mod store;
pub mod students;
pub mod subscriptions;
pub mod types;
pub mod view;

// Re-exports
pub use actions::{apply, apply_raw, Action};
pub use error::{Result, StoreError};
pub use forms::{StudentDraft, UserDraft};
pub use ids::{IdGenerator, IdStrategy, RandomIds, TimestampIds};
pub use store::{DispatchOutcome, StoreConfig, UserStore};
pub use students::StudentLog;
pub use subscriptions::{
    Collection, DropReason, StoreEvent, SubscriptionConfig, SubscriptionFilter,
    SubscriptionHandle, SubscriptionId, SubscriptionManager,
};
pub use types::*;
pub use view::{render_student_table, render_user_list};
