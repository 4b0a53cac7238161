//! Append-only student table.
//!
//! Students carry no identity key, so the table only grows: there is no
//! update or delete, and the same student may appear more than once.

use crate::subscriptions::{
    Collection, SubscriptionConfig, SubscriptionHandle, SubscriptionId, SubscriptionManager,
};
use crate::types::{Sequence, Student, StudentTable};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

struct Current {
    version: Sequence,
    snapshot: Arc<StudentTable>,
}

/// Holds the student table.
pub struct StudentLog {
    current: RwLock<Current>,
    subscriptions: SubscriptionManager,
}

impl StudentLog {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Current {
                version: Sequence::default(),
                snapshot: Arc::new(StudentTable::default()),
            }),
            subscriptions: SubscriptionManager::new(),
        }
    }

    pub fn snapshot(&self) -> Arc<StudentTable> {
        Arc::clone(&self.current.read().snapshot)
    }

    pub fn version(&self) -> Sequence {
        self.current.read().version
    }

    /// Append a student and return the new snapshot.
    pub fn append(&self, student: Student) -> Arc<StudentTable> {
        let (version, snapshot) = {
            let mut current = self.current.write();
            let mut students = Vec::with_capacity(current.snapshot.len() + 1);
            students.extend(current.snapshot.students.iter().cloned());
            students.push(student);

            current.version = current.version.next();
            current.snapshot = Arc::new(StudentTable { students });
            self.subscriptions.broadcast_changed(
                Collection::Students,
                current.version,
                current.snapshot.len(),
            );
            (current.version, Arc::clone(&current.snapshot))
        };

        debug!(version = version.0, len = snapshot.len(), "appended student");

        snapshot
    }

    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.subscriptions.subscribe(config)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.unsubscribe(id);
    }
}

impl Default for StudentLog {
    fn default() -> Self {
        Self::new()
    }
}
