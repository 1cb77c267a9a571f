//! Destination client: lookup, resolve, upsert and tag association
//!
//! Upsert protocol:
//! 1. Look the remote key up (cache first, then the destination's
//!    remote-key filter). A miss or a non-success lookup means "absent",
//!    not failure.
//! 2. Namespace the key (`label|key`); the raw key never goes on the wire.
//! 3. Found: replace, expecting 200 and a true result flag.
//! 4. Absent: create, expecting 201, a true result flag and the new id.
//! 5. Cache the id under (kind, raw key) and return it.
//!
//! Re-running a migration is therefore idempotent for entities: every
//! previously migrated record is recognized by its remote key and
//! replaced in place.

use super::ids::{DestinationId, RemoteKeyNamespace, SourceKey};
use super::kind::{EndpointTable, EntityKind, DESTINATION_PATH};
use super::reference::ReferenceCache;
use super::resource::{AssociationPayload, DestinationResource};
use super::stats::SyncStats;
use crate::error::{SyncError, SyncResult};
use crate::transport::{HttpClient, HttpRequest, HttpResponse};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;

/// Outcome of looking a remote key up.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(DestinationId),
    Absent,
}

/// The operations adapters need from the destination.
#[async_trait]
pub trait Destination: Send + Sync {
    /// Create or replace the entity described by `resource`, returning its destination id.
    async fn upsert(&self, resource: &DestinationResource) -> SyncResult<DestinationId>;

    /// Destination id of an entity migrated earlier; `SyncError::Resolution` if there is none.
    async fn resolve(&self, kind: EntityKind, key: &SourceKey) -> SyncResult<DestinationId>;

    /// Link an item to the tag migrated from `tag`.
    ///
    /// Not idempotent: no check is made for an existing link, so a rerun
    /// re-issues every association.
    async fn associate(&self, item: &DestinationId, tag: &SourceKey) -> SyncResult<()>;
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(rename = "_embedded", default)]
    embedded: Option<Embedded>,
}

#[derive(Debug, Deserialize)]
struct Embedded {
    #[serde(default)]
    item: Vec<ListEntity>,
}

#[derive(Debug, Deserialize)]
struct ListEntity {
    id: DestinationId,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    #[serde(default)]
    result: bool,
    #[serde(default)]
    id: Option<DestinationId>,
}

fn write_response(response: &HttpResponse) -> Option<WriteResponse> {
    response
        .decode::<WriteResponse>()
        .ok()
        .flatten()
        .filter(|r| r.result)
}

/// REST client for the destination platform.
///
/// Holds the run's reference cache and counters; both are injected so
/// one run can share them across every adapter phase.
pub struct DestinationClient {
    http: Arc<dyn HttpClient>,
    namespace: RemoteKeyNamespace,
    endpoints: EndpointTable,
    cache: Arc<ReferenceCache>,
    stats: Arc<SyncStats>,
}

impl DestinationClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        namespace: RemoteKeyNamespace,
        cache: Arc<ReferenceCache>,
    ) -> Self {
        Self {
            http,
            namespace,
            endpoints: EndpointTable::default(),
            cache,
            stats: Arc::new(SyncStats::new()),
        }
    }

    pub fn with_endpoints(mut self, endpoints: EndpointTable) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_stats(mut self, stats: Arc<SyncStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn cache(&self) -> &Arc<ReferenceCache> {
        &self.cache
    }

    pub fn stats(&self) -> &Arc<SyncStats> {
        &self.stats
    }

    pub fn namespace(&self) -> &RemoteKeyNamespace {
        &self.namespace
    }

    /// Find the destination id for (kind, key) without failing on a miss.
    ///
    /// A hit is cached. Transport failures still propagate.
    pub async fn lookup(&self, kind: EntityKind, key: &SourceKey) -> SyncResult<Lookup> {
        if let Some(id) = self.cache.get(kind, key) {
            return Ok(Lookup::Found(id));
        }

        let remote_key = self.namespace.compose(key);
        let request = HttpRequest::get(DESTINATION_PATH)
            .with_query(self.endpoints.endpoint(kind).lookup_query(&remote_key));
        let response = self.http.send(request).await?;

        if response.status != STATUS_OK {
            debug!(%kind, %remote_key, status = response.status, "lookup returned non-success status");
            return Ok(Lookup::Absent);
        }

        let first = match response.decode::<ListEnvelope>() {
            Ok(envelope) => envelope
                .and_then(|e| e.embedded)
                .and_then(|e| e.item.into_iter().next()),
            Err(e) => {
                warn!(%kind, %remote_key, error = %e, "unreadable lookup response");
                None
            }
        };

        match first {
            Some(entity) => {
                self.cache.set(kind, key.clone(), entity.id.clone());
                self.stats.record_found(kind);
                info!("Found remotely {} {} with id {}", kind, key, entity.id);
                Ok(Lookup::Found(entity.id))
            }
            None => Ok(Lookup::Absent),
        }
    }

    async fn replace(
        &self,
        resource: &DestinationResource,
        remote_key: String,
        id: DestinationId,
    ) -> SyncResult<DestinationId> {
        let kind = resource.kind();
        let body = serde_json::to_value(resource.payload(remote_key, Some(&id)))?;
        debug!(%kind, payload = %body, "replacing entity");

        let request = HttpRequest::put(DESTINATION_PATH, body)
            .with_query(self.endpoints.endpoint(kind).query());
        let response = self.http.send(request).await?;

        if response.status != STATUS_OK || write_response(&response).is_none() {
            return Err(SyncError::Upsert {
                kind,
                key: resource.remote_key.clone(),
                status: response.status,
            });
        }

        self.stats.record_updated(kind);
        info!("Updated entity {} with id {}", kind, id);
        Ok(id)
    }

    async fn create(
        &self,
        resource: &DestinationResource,
        remote_key: String,
    ) -> SyncResult<DestinationId> {
        let kind = resource.kind();
        let body = serde_json::to_value(resource.payload(remote_key, None))?;
        debug!(%kind, payload = %body, "creating entity");

        let request = HttpRequest::post(DESTINATION_PATH, body)
            .with_query(self.endpoints.endpoint(kind).query());
        let response = self.http.send(request).await?;

        let created = (response.status == STATUS_CREATED)
            .then(|| write_response(&response))
            .flatten()
            .and_then(|r| r.id);
        let Some(id) = created else {
            return Err(SyncError::Upsert {
                kind,
                key: resource.remote_key.clone(),
                status: response.status,
            });
        };

        self.stats.record_created(kind);
        info!("Created remote entity {} with id {}", kind, id);
        Ok(id)
    }
}

#[async_trait]
impl Destination for DestinationClient {
    async fn upsert(&self, resource: &DestinationResource) -> SyncResult<DestinationId> {
        let kind = resource.kind();
        let existing = self.lookup(kind, &resource.remote_key).await?;
        let remote_key = self.namespace.compose(&resource.remote_key);

        let id = match existing {
            Lookup::Found(id) => self.replace(resource, remote_key, id).await?,
            Lookup::Absent => self.create(resource, remote_key).await?,
        };

        self.cache.set(kind, resource.remote_key.clone(), id.clone());
        Ok(id)
    }

    async fn resolve(&self, kind: EntityKind, key: &SourceKey) -> SyncResult<DestinationId> {
        match self.lookup(kind, key).await? {
            Lookup::Found(id) => Ok(id),
            Lookup::Absent => Err(SyncError::Resolution {
                kind,
                key: key.clone(),
            }),
        }
    }

    async fn associate(&self, item: &DestinationId, tag: &SourceKey) -> SyncResult<()> {
        let tag_id = self.resolve(EntityKind::Tag, tag).await?;
        let body = serde_json::to_value(AssociationPayload {
            content_id: item,
            tag_id: &tag_id,
        })?;

        let request = HttpRequest::post(DESTINATION_PATH, body)
            .with_query(self.endpoints.association_query());
        let response = self.http.send(request).await?;

        if response.status != STATUS_OK || write_response(&response).is_none() {
            return Err(SyncError::Association {
                item: item.clone(),
                tag: tag_id,
                status: response.status,
            });
        }

        self.stats.record_association();
        info!("Added tag {} to item {}", tag_id, item);
        Ok(())
    }
}
