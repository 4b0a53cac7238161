//! Actions on the user collection and the reducer that applies them.
//!
//! The reducer is a pure function from one snapshot to the next. Typed
//! actions cannot be invalid; raw actions decoded from JSON are checked
//! against the closed set of kinds and rejected with
//! `StoreError::InvalidAction` before any state is touched.

mod reducer;
mod types;

pub use reducer::{apply, apply_raw};
pub use types::Action;
