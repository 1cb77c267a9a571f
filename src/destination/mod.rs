//! Remote entity synchronization against the destination platform
//!
//! The destination assigns its own identifiers. Every entity carries a
//! namespaced remote key (`label|source id`) so a rerun finds and
//! replaces what an earlier run created, and a run-scoped
//! `ReferenceCache` translates source ids into destination ids for
//! parent, category and tag references.

mod client;
mod ids;
mod kind;
mod reference;
mod resource;
mod stats;

pub use client::{Destination, DestinationClient, Lookup};
pub use ids::{DestinationId, RemoteKeyNamespace, SourceKey, REMOTE_KEY_SEPARATOR};
pub use kind::{Endpoint, EndpointTable, EntityKind, DESTINATION_PATH};
pub use reference::ReferenceCache;
pub use resource::{DestinationResource, ItemFields, ResourceFields, TaxonomyFields};
pub use stats::{KindTotals, SyncReport, SyncStats};
