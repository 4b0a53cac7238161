//! User id generation.
//!
//! Ids are assigned by the caller at creation time, before an `Add` reaches
//! the reducer. The reducer never deduplicates, so a generator that can hand
//! out the same id twice produces duplicate rows.

use crate::types::{Timestamp, UserId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Source of fresh user ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> UserId;
}

/// Which generator a store uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdStrategy {
    /// Millisecond timestamps, bumped so they strictly increase.
    #[default]
    Timestamp,
    /// Random UUID v4 strings.
    Random,
}

impl IdStrategy {
    pub fn build(self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Timestamp => Box::new(TimestampIds::new()),
            IdStrategy::Random => Box::new(RandomIds),
        }
    }
}

/// Timestamp-derived ids that never repeat within one generator.
///
/// Two calls inside the same millisecond get `t` and `t + 1`; the generator
/// keeps running ahead of the clock until the clock catches up.
pub struct TimestampIds {
    clock: Box<dyn Fn() -> Timestamp + Send + Sync>,
    last: Mutex<Option<u64>>,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::with_clock(Timestamp::now)
    }

    /// Use a custom clock (tests pin it to a fixed instant).
    pub fn with_clock(clock: impl Fn() -> Timestamp + Send + Sync + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            last: Mutex::new(None),
        }
    }
}

impl Default for TimestampIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&self) -> UserId {
        let now = (self.clock)().0;
        let mut last = self.last.lock();
        let value = match *last {
            Some(prev) if now <= prev => prev + 1,
            _ => now,
        };
        *last = Some(value);
        UserId(value.to_string())
    }
}

/// Random UUID v4 ids.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> UserId {
        UserId(uuid::Uuid::new_v4().to_string())
    }
}
