//! Bookkeeping set keeping pending references alive

use super::reference::{CleanerReference, ReferenceId};
use dashmap::DashMap;
use std::sync::Arc;

/// Every reference whose cleanup has not run and which has not been cleared.
///
/// Sharded, so unrelated registrations do not contend on one lock.
#[derive(Debug, Default)]
pub(crate) struct LiveSet {
    entries: DashMap<ReferenceId, Arc<CleanerReference>>,
}

impl LiveSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, reference: Arc<CleanerReference>) {
        self.entries.insert(reference.id(), reference);
    }

    /// Idempotent; returns whether the reference was still present
    pub(crate) fn remove(&self, id: ReferenceId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
