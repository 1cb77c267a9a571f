//! content-migrator: idempotent content migration into a REST content platform
//!
//! Moves categories, tags and content items from a Joomla or WordPress
//! site into a destination platform that assigns its own identifiers.
//!
//! # Core Concepts
//!
//! - **Remote key**: `<label>|<source id>`, stored on every destination
//!   entity so a rerun recognizes what an earlier run created
//! - **Reference cache**: run-scoped map from (kind, source id) to
//!   destination id, used to resolve parent, category and tag references
//! - **Upsert**: look up by remote key, then replace or create
//! - **Traversal**: ordered, strictly sequential walk over a paged source
//!   collection
//!
//! # Example
//!
//! ```
//! use content_migrator::{RemoteKeyNamespace, SourceKey};
//!
//! let ns = RemoteKeyNamespace::new("WORDPRESS");
//! assert_eq!(ns.compose(&SourceKey::from(42i64)), "WORDPRESS|42");
//! ```

pub mod config;
pub mod destination;
mod error;
pub mod migration;
pub mod source;
pub mod transport;
pub mod traversal;

pub use config::{MigrationConfig, RemoteConfig, SourceSystem};
pub use destination::{
    Destination, DestinationClient, DestinationId, DestinationResource, EntityKind, ItemFields,
    Lookup, ReferenceCache, RemoteKeyNamespace, SourceKey, SyncReport, SyncStats, TaxonomyFields,
};
pub use error::{ConfigError, SyncError, SyncResult, TransportError};
pub use migration::Migration;
pub use source::{JoomlaSource, SourceAdapter, WordpressSource};
pub use transport::{HttpClient, HttpRequest, HttpResponse, Method, QueryParams, ReqwestClient};
pub use traversal::{Collection, Pagination, Traversal, DEFAULT_PAGE_SIZE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
