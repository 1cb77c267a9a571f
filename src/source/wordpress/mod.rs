//! WordPress source adapter
//!
//! Reads the `wp/v2` REST API. Collections page by page number over bare
//! arrays; a short or empty page is the last. WordPress cannot order
//! categories parents-first, so the category phase walks the tree one
//! parent at a time: children of a category are requested only after
//! that category has been upserted.

pub mod models;

use self::models::{Category, Post, Tag, ROOT_PARENT_ID};
use super::traits::SourceAdapter;
use crate::destination::{
    Destination, DestinationResource, EntityKind, ItemFields, SourceKey, TaxonomyFields,
};
use crate::error::SyncResult;
use crate::transport::HttpClient;
use crate::traversal::{Collection, Pagination, Traversal, DEFAULT_PAGE_SIZE};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

const CATEGORIES_PATH: &str = "/wp-json/wp/v2/categories";
const TAGS_PATH: &str = "/wp-json/wp/v2/tags";
const POSTS_PATH: &str = "/wp-json/wp/v2/posts";
const PAGES_PATH: &str = "/wp-json/wp/v2/pages";

pub struct WordpressSource {
    http: Arc<dyn HttpClient>,
    page_size: usize,
}

impl WordpressSource {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    fn traversal(&self) -> Traversal<'_> {
        Traversal::new(self.http.as_ref(), self.page_size)
    }

    /// Posts: categories resolved up front, tags linked after the upsert.
    pub async fn migrate_posts(&self, destination: &dyn Destination) -> SyncResult<()> {
        let collection = Collection::new(POSTS_PATH, Pagination::ShortPage);
        let count = self
            .traversal()
            .traverse(&collection, move |post: Post| async move {
                let mut categories = Vec::with_capacity(post.categories.len());
                for category in &post.categories {
                    categories.push(destination.resolve(EntityKind::Category, category).await?);
                }

                let mut fields = ItemFields::new(post.title.rendered)
                    .with_content(post.content.rendered)
                    .with_excerpt(post.excerpt.rendered)
                    .with_cleared_tags();
                if !categories.is_empty() {
                    fields = fields.with_categories(categories);
                }

                let resource = DestinationResource::item(post.id, fields);
                let remote_id = destination.upsert(&resource).await?;
                info!("Saved Post with remote id {}", remote_id);
                debug!(?resource, "post resource");

                for tag in &post.tags {
                    destination.associate(&remote_id, tag).await?;
                }
                Ok(())
            })
            .await?;
        info!(count, "WordPress posts migrated");
        Ok(())
    }

    pub async fn migrate_pages(&self, destination: &dyn Destination) -> SyncResult<()> {
        let collection = Collection::new(PAGES_PATH, Pagination::ShortPage);
        let count = self
            .traversal()
            .traverse(&collection, move |page: Post| async move {
                let fields = ItemFields::new(page.title.rendered)
                    .with_content(page.content.rendered)
                    .with_excerpt(page.excerpt.rendered);

                let resource = DestinationResource::item(page.id, fields);
                let remote_id = destination.upsert(&resource).await?;
                info!("Saved Page with remote id {}", remote_id);
                debug!(?resource, "page resource");
                Ok(())
            })
            .await?;
        info!(count, "WordPress pages migrated");
        Ok(())
    }
}

#[async_trait]
impl SourceAdapter for WordpressSource {
    fn id(&self) -> &str {
        "wordpress"
    }

    async fn migrate_categories(&self, destination: &dyn Destination) -> SyncResult<()> {
        let traversal = self.traversal();
        let mut parents = vec![SourceKey::from(ROOT_PARENT_ID)];
        let mut count = 0;

        while let Some(parent) = parents.pop() {
            let collection =
                Collection::new(CATEGORIES_PATH, Pagination::ShortPage).with_param("parent", &parent);
            let saved = Mutex::new(Vec::new());
            let saved_ref = &saved;

            count += traversal
                .traverse(&collection, move |category: Category| async move {
                    let mut fields =
                        TaxonomyFields::new(category.name).with_description(category.description);
                    if category.parent.as_str() != ROOT_PARENT_ID {
                        fields = fields
                            .with_parent(destination.resolve(EntityKind::Category, &category.parent).await?);
                    }

                    let resource = DestinationResource::category(category.id.clone(), fields);
                    let remote_id = destination.upsert(&resource).await?;
                    saved_ref.lock().await.push(category.id);
                    info!("Saved Category with remote id {}", remote_id);
                    debug!(?resource, "category resource");
                    Ok(())
                })
                .await?;

            parents.extend(saved.into_inner());
        }

        info!(count, "WordPress categories migrated");
        Ok(())
    }

    async fn migrate_tags(&self, destination: &dyn Destination) -> SyncResult<()> {
        let collection = Collection::new(TAGS_PATH, Pagination::ShortPage);
        let count = self
            .traversal()
            .traverse(&collection, move |tag: Tag| async move {
                let fields = TaxonomyFields::new(tag.name).with_description(tag.description);
                let resource = DestinationResource::tag(tag.id, fields);
                let remote_id = destination.upsert(&resource).await?;
                info!("Saved Tag with remote id {}", remote_id);
                debug!(?resource, "tag resource");
                Ok(())
            })
            .await?;
        info!(count, "WordPress tags migrated");
        Ok(())
    }

    async fn migrate_items(&self, destination: &dyn Destination) -> SyncResult<()> {
        self.migrate_posts(destination).await?;
        self.migrate_pages(destination).await
    }
}
