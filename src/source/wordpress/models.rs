//! WordPress REST API (`wp/v2`) record shapes

use crate::destination::SourceKey;
use serde::Deserialize;

/// `parent` of top-level categories.
pub const ROOT_PARENT_ID: &str = "0";

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: SourceKey,
    pub name: String,
    pub parent: SourceKey,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub id: SourceKey,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// A post or a page. Pages carry neither categories nor tags.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: SourceKey,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
    #[serde(default)]
    pub categories: Vec<SourceKey>,
    #[serde(default)]
    pub tags: Vec<SourceKey>,
}
