//! Joomla source adapter
//!
//! Reads the Joomla 4 web services API. Collections page by offset and
//! expose a `links.next` while more data exists. Categories and tags are
//! ordered by their nested-set left value, which puts every parent
//! ahead of its children.

pub mod models;

use self::models::{Article, Category, Datum, Tag, ROOT_PARENT_ID};
use super::traits::SourceAdapter;
use crate::destination::{Destination, DestinationResource, EntityKind, ItemFields, SourceKey, TaxonomyFields};
use crate::error::{SyncError, SyncResult};
use crate::transport::{HttpClient, HttpRequest};
use crate::traversal::{Collection, Pagination, Traversal, DEFAULT_PAGE_SIZE};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

const CATEGORIES_PATH: &str = "/api/index.php/v1/content/categories";
const TAGS_PATH: &str = "/api/index.php/v1/tags";
const ARTICLES_PATH: &str = "/api/index.php/v1/content/articles";

pub struct JoomlaSource {
    http: Arc<dyn HttpClient>,
    page_size: usize,
}

impl JoomlaSource {
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

    fn nested_set(path: &str) -> Collection {
        Collection::new(path, Pagination::NextLink)
            .with_param("list[ordering]", "a.lft")
            .with_param("list[direction]", "asc")
    }

    /// The article list omits tags; the detail endpoint carries them.
    async fn fetch_article(&self, id: &SourceKey) -> SyncResult<Article> {
        let path = format!("{}/{}", ARTICLES_PATH, id);
        let response = self.http.send(HttpRequest::get(&path)).await?;
        if response.status != 200 {
            return Err(SyncError::Fetch {
                url: path,
                reason: format!("status {}", response.status),
            });
        }
        match response.decode::<Datum<Article>>() {
            Ok(Some(datum)) => Ok(datum.data),
            Ok(None) => Err(SyncError::Fetch {
                url: path,
                reason: "empty response".to_string(),
            }),
            Err(e) => Err(SyncError::Fetch {
                url: path,
                reason: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl SourceAdapter for JoomlaSource {
    fn id(&self) -> &str {
        "joomla"
    }

    async fn migrate_categories(&self, destination: &dyn Destination) -> SyncResult<()> {
        let collection = Self::nested_set(CATEGORIES_PATH);
        let count = self
            .traversal()
            .traverse(&collection, move |category: Category| async move {
                let mut fields = TaxonomyFields::new(category.attributes.title);
                let parent = &category.attributes.parent_id;
                if parent.as_str() != ROOT_PARENT_ID {
                    fields = fields.with_parent(destination.resolve(EntityKind::Category, parent).await?);
                }

                let resource = DestinationResource::category(category.id, fields);
                let remote_id = destination.upsert(&resource).await?;
                info!("Saved Category with remote id {}", remote_id);
                debug!(?resource, "category resource");
                Ok(())
            })
            .await?;
        info!(count, "Joomla categories migrated");
        Ok(())
    }

    async fn migrate_tags(&self, destination: &dyn Destination) -> SyncResult<()> {
        let collection = Self::nested_set(TAGS_PATH);
        let count = self
            .traversal()
            .traverse(&collection, move |tag: Tag| async move {
                let mut fields = TaxonomyFields::new(tag.attributes.title);
                if let Some(description) = tag.attributes.description {
                    fields = fields.with_description(description);
                }
                let parent = &tag.attributes.parent_id;
                if parent.as_str() != ROOT_PARENT_ID {
                    fields = fields.with_parent(destination.resolve(EntityKind::Tag, parent).await?);
                }

                let resource = DestinationResource::tag(tag.id, fields);
                let remote_id = destination.upsert(&resource).await?;
                info!("Saved Tag with remote id {}", remote_id);
                debug!(?resource, "tag resource");
                Ok(())
            })
            .await?;
        info!(count, "Joomla tags migrated");
        Ok(())
    }

    async fn migrate_items(&self, destination: &dyn Destination) -> SyncResult<()> {
        let collection = Collection::new(ARTICLES_PATH, Pagination::NextLink)
            .with_param("list[ordering]", "a.id")
            .with_param("list[direction]", "asc");
        let count = self
            .traversal()
            .traverse(&collection, move |article: Article| async move {
                let category = destination
                    .resolve(EntityKind::Category, &article.relationships.category.data.id)
                    .await?;
                let detail = self.fetch_article(&article.id).await?;

                let fields = ItemFields {
                    metaverse_content: article.attributes.text,
                    ..ItemFields::new(article.attributes.title)
                }
                .with_cleared_tags()
                .with_categories(vec![category]);

                let resource = DestinationResource::item(article.id, fields);
                let remote_id = destination.upsert(&resource).await?;
                info!("Saved Item with remote id {}", remote_id);
                debug!(?resource, "item resource");

                for tag in detail.attributes.tag_ids() {
                    destination.associate(&remote_id, &tag).await?;
                }
                Ok(())
            })
            .await?;
        info!(count, "Joomla articles migrated");
        Ok(())
    }
}
