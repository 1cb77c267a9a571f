//! Entity kinds and their destination endpoints

use crate::transport::QueryParams;
use serde::{Deserialize, Serialize};

/// The closed set of entity kinds the destination stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Category,
    Tag,
    Item,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [Self::Category, Self::Tag, Self::Item];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Category => 0,
            Self::Tag => 1,
            Self::Item => 2,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Tag => write!(f, "tag"),
            Self::Item => write!(f, "item"),
        }
    }
}

/// Path every destination request goes to; the view selects the collection.
pub const DESTINATION_PATH: &str = "/index.php";

const TASK_ADD_TAG: &str = "addTag";

/// Where one kind lives on the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub view: String,
}

impl Endpoint {
    pub fn new(view: impl Into<String>) -> Self {
        Self { view: view.into() }
    }

    /// Base query for the collection: webservice selection plus the view.
    pub fn query(&self) -> QueryParams {
        QueryParams::new()
            .with("option", "reditem")
            .with("webserviceClient", "site")
            .with("webserviceVersion", "1.0.0")
            .with("api", "hal")
            .with("view", &self.view)
    }

    /// Collection query filtered to one remote key.
    pub fn lookup_query(&self, remote_key: &str) -> QueryParams {
        self.query().with("filter[remote_key]", remote_key)
    }
}

/// One endpoint per entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTable {
    pub category: Endpoint,
    pub tag: Endpoint,
    pub item: Endpoint,
}

impl EndpointTable {
    pub fn endpoint(&self, kind: EntityKind) -> &Endpoint {
        match kind {
            EntityKind::Category => &self.category,
            EntityKind::Tag => &self.tag,
            EntityKind::Item => &self.item,
        }
    }

    /// Tag links are created through the item view's `addTag` task.
    pub fn association_query(&self) -> QueryParams {
        self.item.query().with("task", TASK_ADD_TAG)
    }
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self {
            category: Endpoint::new("category_with_org_check_aesirx_categories_69"),
            tag: Endpoint::new("category_with_org_check_aesirx_tags_70"),
            item: Endpoint::new("item_with_org_check_aesirx_content_68"),
        }
    }
}
