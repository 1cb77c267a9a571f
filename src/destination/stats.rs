//! Run counters and the end-of-run report

use super::kind::EntityKind;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters updated by the destination client as it confirms writes.
#[derive(Debug, Default)]
pub struct SyncStats {
    created: [AtomicUsize; 3],
    updated: [AtomicUsize; 3],
    found_remotely: [AtomicUsize; 3],
    associations: AtomicUsize,
}

impl SyncStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_created(&self, kind: EntityKind) {
        self.created[kind.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_updated(&self, kind: EntityKind) {
        self.updated[kind.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_found(&self, kind: EntityKind) {
        self.found_remotely[kind.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_association(&self) {
        self.associations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn created(&self, kind: EntityKind) -> usize {
        self.created[kind.index()].load(Ordering::Relaxed)
    }

    pub fn updated(&self, kind: EntityKind) -> usize {
        self.updated[kind.index()].load(Ordering::Relaxed)
    }

    /// Remote lookups that matched an existing entity
    pub fn found_remotely(&self, kind: EntityKind) -> usize {
        self.found_remotely[kind.index()].load(Ordering::Relaxed)
    }

    pub fn associations(&self) -> usize {
        self.associations.load(Ordering::Relaxed)
    }
}

/// Per-kind write totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindTotals {
    pub created: usize,
    pub updated: usize,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub categories: KindTotals,
    pub tags: KindTotals,
    pub items: KindTotals,
    pub associations: usize,
}

impl SyncReport {
    pub fn from_stats(stats: &SyncStats, started_at: DateTime<Utc>) -> Self {
        let totals = |kind| KindTotals {
            created: stats.created(kind),
            updated: stats.updated(kind),
        };
        Self {
            started_at,
            finished_at: Utc::now(),
            categories: totals(EntityKind::Category),
            tags: totals(EntityKind::Tag),
            items: totals(EntityKind::Item),
            associations: stats.associations(),
        }
    }

    pub fn totals(&self, kind: EntityKind) -> KindTotals {
        match kind {
            EntityKind::Category => self.categories,
            EntityKind::Tag => self.tags,
            EntityKind::Item => self.items,
        }
    }
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let elapsed = self.finished_at - self.started_at;
        write!(
            f,
            "categories {} created/{} updated, tags {} created/{} updated, \
             items {} created/{} updated, {} tag links in {}.{:03}s",
            self.categories.created,
            self.categories.updated,
            self.tags.created,
            self.tags.updated,
            self.items.created,
            self.items.updated,
            self.associations,
            elapsed.num_seconds(),
            elapsed.num_milliseconds().rem_euclid(1000),
        )
    }
}
