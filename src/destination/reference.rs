//! Identifier reference cache
//!
//! Maps (kind, source key) to the destination identifier for the
//! lifetime of one run. Entries are written only after the destination
//! confirmed them (create/replace success or a lookup hit) and are never
//! evicted.

use super::ids::{DestinationId, SourceKey};
use super::kind::EntityKind;
use dashmap::DashMap;

/// Run-scoped source-to-destination identifier map.
///
/// Callers serialize record processing, so two writers never race for
/// the same key. Concurrent upserts of one key would need per-key
/// locking on top of this.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    entries: DashMap<(EntityKind, SourceKey), DestinationId>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, kind: EntityKind, key: &SourceKey) -> Option<DestinationId> {
        self.entries
            .get(&(kind, key.clone()))
            .map(|entry| entry.value().clone())
    }

    pub fn set(&self, kind: EntityKind, key: SourceKey, id: DestinationId) {
        self.entries.insert((kind, key), id);
    }

    pub fn contains(&self, kind: EntityKind, key: &SourceKey) -> bool {
        self.entries.contains_key(&(kind, key.clone()))
    }

    /// Number of cached entries of one kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entries.iter().filter(|e| e.key().0 == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
