//! SourceAdapter trait — the contract each source system implements

use crate::destination::Destination;
use crate::error::SyncResult;
use async_trait::async_trait;

/// Migrates one source system into a destination.
///
/// Phases must run strictly one after another, in dependency order:
/// categories, then tags, then items. Within each phase a parent is
/// upserted before any of its children.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Short name used in logs
    fn id(&self) -> &str;

    async fn migrate_categories(&self, destination: &dyn Destination) -> SyncResult<()>;

    async fn migrate_tags(&self, destination: &dyn Destination) -> SyncResult<()>;

    /// Items resolve their category references and then link their tags,
    /// so they run after both taxonomies.
    async fn migrate_items(&self, destination: &dyn Destination) -> SyncResult<()>;

    async fn run_all(&self, destination: &dyn Destination) -> SyncResult<()> {
        self.migrate_categories(destination).await?;
        self.migrate_tags(destination).await?;
        self.migrate_items(destination).await
    }
}
