//! Migration runs: one source adapter into one destination
//!
//! A run owns the reference cache and counters for its whole lifetime.
//! Phases run strictly one after another and every record is handled to
//! completion before the next one starts; nothing here spawns tasks.

use crate::config::{MigrationConfig, RemoteConfig, SourceSystem};
use crate::destination::{DestinationClient, ReferenceCache, RemoteKeyNamespace, SyncReport};
use crate::error::SyncResult;
use crate::source::{JoomlaSource, SourceAdapter, WordpressSource};
use crate::transport::{HttpClient, ReqwestClient};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub struct Migration {
    adapter: Arc<dyn SourceAdapter>,
    destination: DestinationClient,
}

impl Migration {
    pub fn new(adapter: Arc<dyn SourceAdapter>, destination: DestinationClient) -> Self {
        Self {
            adapter,
            destination,
        }
    }

    /// Wire real HTTP clients for `config`.
    pub fn from_config(config: &MigrationConfig) -> SyncResult<Self> {
        config.validate()?;

        let source_http = http_client(&config.source)?;
        let adapter: Arc<dyn SourceAdapter> = match config.source_system {
            SourceSystem::Joomla => {
                Arc::new(JoomlaSource::new(source_http).with_page_size(config.page_size))
            }
            SourceSystem::Wordpress => {
                Arc::new(WordpressSource::new(source_http).with_page_size(config.page_size))
            }
        };

        let destination = DestinationClient::new(
            http_client(&config.destination)?,
            RemoteKeyNamespace::new(config.label.clone()),
            Arc::new(ReferenceCache::new()),
        )
        .with_endpoints(config.endpoints.clone());

        Ok(Self::new(adapter, destination))
    }

    /// Categories, then tags, then items. The first failure ends the run.
    pub async fn run(&self) -> SyncResult<SyncReport> {
        let started_at = Utc::now();
        info!(
            source = self.adapter.id(),
            label = self.destination.namespace().label(),
            "starting migration"
        );

        self.adapter.run_all(&self.destination).await?;

        let report = SyncReport::from_stats(self.destination.stats(), started_at);
        info!(
            cached = self.destination.cache().len(),
            "migration finished: {}", report
        );
        Ok(report)
    }
}

fn http_client(remote: &RemoteConfig) -> SyncResult<Arc<dyn HttpClient>> {
    let mut client = ReqwestClient::new(remote.base_url.clone())?;
    if let Some(token) = &remote.bearer_token {
        client = client.with_bearer_token(token.clone());
    }
    Ok(Arc::new(client))
}

/// Build and run a migration from configuration.
pub async fn run(config: &MigrationConfig) -> SyncResult<SyncReport> {
    Migration::from_config(config)?.run().await
}
