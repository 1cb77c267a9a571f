//! Error types for transport, synchronization and configuration

use crate::destination::{DestinationId, EntityKind, SourceKey};
use thiserror::Error;

/// Errors raised by an `HttpClient` before a response status is known.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors that abort a migration run.
///
/// Every variant is fatal: no layer recovers locally, the failure
/// propagates to the top of the run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Source page request returned a non-success status or an unreadable payload.
    #[error("data not found at {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// A referenced entity has no counterpart at the destination.
    #[error("data not found: {kind} with remote key {key}")]
    Resolution { kind: EntityKind, key: SourceKey },

    #[error("entity was not created/updated: {kind} {key} (status {status})")]
    Upsert {
        kind: EntityKind,
        key: SourceKey,
        status: u16,
    },

    #[error("entity was not created: tag {tag} on item {item} (status {status})")]
    Association {
        item: DestinationId,
        tag: DestinationId,
        status: u16,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for synchronization operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Invalid or incomplete run configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("invalid migration key '{0}': must be non-empty and must not contain '|'")]
    InvalidLabel(String),
}
