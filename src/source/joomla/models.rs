//! Joomla web services (JSON:API) record shapes

use crate::destination::SourceKey;
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Ordering;

/// `parent_id` of top-level categories and tags (the nested-set root).
pub const ROOT_PARENT_ID: &str = "1";

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: SourceKey,
    pub attributes: CategoryAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryAttributes {
    pub title: String,
    pub parent_id: SourceKey,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub id: SourceKey,
    pub attributes: TagAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagAttributes {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub parent_id: SourceKey,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub id: SourceKey,
    pub attributes: ArticleAttributes,
    pub relationships: ArticleRelationships,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleAttributes {
    pub title: String,
    #[serde(default)]
    pub text: Option<String>,
    /// Tag id → title. PHP serializes an empty map as `[]`.
    #[serde(default)]
    pub tags: Value,
}

impl ArticleAttributes {
    /// Tag ids attached to the article. Map keys come back in ascending
    /// numeric order, list entries in payload order.
    pub fn tag_ids(&self) -> Vec<SourceKey> {
        match &self.tags {
            Value::Object(map) => {
                let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
                keys.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => a.cmp(b),
                });
                keys.into_iter().map(SourceKey::from).collect()
            }
            Value::Array(values) => values
                .iter()
                .filter_map(|v| match v {
                    Value::Number(n) => Some(SourceKey::from(n.to_string())),
                    Value::String(s) => Some(SourceKey::from(s.as_str())),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleRelationships {
    pub category: Relationship,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    pub data: ResourceIdentifier,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceIdentifier {
    pub id: SourceKey,
}

/// Single-resource envelope returned by the detail endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Datum<T> {
    pub data: T,
}
