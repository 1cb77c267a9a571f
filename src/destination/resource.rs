//! Destination resource shapes
//!
//! A `DestinationResource` is what an adapter hands to the upsert
//! protocol: the raw source key plus kind-specific fields. The wire
//! payload (namespaced remote key, destination id) is composed by the
//! client and never by adapters.

use super::ids::{DestinationId, SourceKey};
use super::kind::EntityKind;
use serde::Serialize;

/// Fields shared by categories and tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaxonomyFields {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<DestinationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TaxonomyFields {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_id: DestinationId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Fields of a content item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemFields {
    pub title: String,
    /// Body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metaverse_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// `Some(vec![])` clears the item's tags; links are re-added afterwards.
    #[serde(rename = "aesirx_tags", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<DestinationId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<DestinationId>>,
}

impl ItemFields {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.metaverse_content = Some(content.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn with_cleared_tags(mut self) -> Self {
        self.tags = Some(Vec::new());
        self
    }

    pub fn with_categories(mut self, categories: Vec<DestinationId>) -> Self {
        self.categories = Some(categories);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceFields {
    Category(TaxonomyFields),
    Tag(TaxonomyFields),
    Item(ItemFields),
}

/// A source-described entity ready to be upserted.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationResource {
    /// Raw source identifier, namespaced only on the wire
    pub remote_key: SourceKey,
    pub fields: ResourceFields,
}

impl DestinationResource {
    pub fn category(remote_key: impl Into<SourceKey>, fields: TaxonomyFields) -> Self {
        Self {
            remote_key: remote_key.into(),
            fields: ResourceFields::Category(fields),
        }
    }

    pub fn tag(remote_key: impl Into<SourceKey>, fields: TaxonomyFields) -> Self {
        Self {
            remote_key: remote_key.into(),
            fields: ResourceFields::Tag(fields),
        }
    }

    pub fn item(remote_key: impl Into<SourceKey>, fields: ItemFields) -> Self {
        Self {
            remote_key: remote_key.into(),
            fields: ResourceFields::Item(fields),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self.fields {
            ResourceFields::Category(_) => EntityKind::Category,
            ResourceFields::Tag(_) => EntityKind::Tag,
            ResourceFields::Item(_) => EntityKind::Item,
        }
    }

    /// The body sent on create (`id == None`) or replace.
    pub(crate) fn payload<'a>(
        &'a self,
        remote_key: String,
        id: Option<&'a DestinationId>,
    ) -> WirePayload<'a> {
        WirePayload {
            remote_key,
            id,
            fields: &self.fields,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WirePayload<'a> {
    remote_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a DestinationId>,
    #[serde(flatten)]
    fields: &'a ResourceFields,
}

/// Body of the tag association request.
#[derive(Debug, Serialize)]
pub(crate) struct AssociationPayload<'a> {
    pub content_id: &'a DestinationId,
    pub tag_id: &'a DestinationId,
}
