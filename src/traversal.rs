//! Paginated sequential traversal of a source collection
//!
//! Walks every page of a collection in order and hands each record to a
//! handler, awaiting the handler before touching the next record or
//! requesting the next page. Later records may reference destination ids
//! produced by earlier ones, so this ordering is load-bearing: record
//! handlers never overlap.

use crate::error::{SyncError, SyncResult};
use crate::transport::{HttpClient, HttpRequest, HttpResponse, QueryParams};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, info};

const STATUS_OK: u16 = 200;

/// Default number of records requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// How a source pages its collections and signals exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// `page[offset]`/`page[limit]` with an `{ data, links: { next } }`
    /// envelope; more data exists while `links.next` is present.
    NextLink,
    /// `page`/`per_page` over a bare array; an empty page or one shorter
    /// than the page size is the last.
    ShortPage,
}

#[derive(Debug, Deserialize)]
struct LinkedPage<T> {
    data: Vec<T>,
    #[serde(default)]
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
struct Links {
    #[serde(default)]
    next: Option<String>,
}

/// One decoded page.
#[derive(Debug)]
struct Page<T> {
    records: Vec<T>,
    has_more: bool,
}

impl Pagination {
    fn origin(self) -> usize {
        match self {
            Self::NextLink => 0,
            Self::ShortPage => 1,
        }
    }

    fn advance(self, cursor: usize, page_size: usize) -> usize {
        match self {
            Self::NextLink => cursor + page_size,
            Self::ShortPage => cursor + 1,
        }
    }

    /// Cursor and ordering parameters; collection filters are layered on top.
    fn page_query(self, cursor: usize, page_size: usize) -> QueryParams {
        match self {
            Self::NextLink => QueryParams::new()
                .with("page[limit]", page_size)
                .with("page[offset]", cursor)
                .with("list[ordering]", "id")
                .with("list[direction]", "asc"),
            Self::ShortPage => QueryParams::new()
                .with("per_page", page_size)
                .with("page", cursor)
                .with("order", "asc")
                .with("orderby", "id"),
        }
    }

    fn decode<T: DeserializeOwned>(
        self,
        response: &HttpResponse,
        page_size: usize,
    ) -> Result<Page<T>, String> {
        if response.status != STATUS_OK {
            return Err(format!("status {}", response.status));
        }
        match self {
            Self::NextLink => {
                let page: LinkedPage<T> = response
                    .decode()
                    .map_err(|e| e.to_string())?
                    .ok_or_else(|| "empty response".to_string())?;
                Ok(Page {
                    has_more: page.links.next.is_some(),
                    records: page.data,
                })
            }
            Self::ShortPage => {
                let records: Vec<T> = response
                    .decode()
                    .map_err(|e| e.to_string())?
                    .ok_or_else(|| "empty response".to_string())?;
                Ok(Page {
                    has_more: !records.is_empty() && records.len() >= page_size,
                    records,
                })
            }
        }
    }
}

/// A source collection: its path, extra filters and paging style.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub path: String,
    /// Filters and ordering overriding the paging defaults
    pub params: QueryParams,
    pub pagination: Pagination,
}

impl Collection {
    pub fn new(path: impl Into<String>, pagination: Pagination) -> Self {
        Self {
            path: path.into(),
            params: QueryParams::new(),
            pagination,
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.set(key, value);
        self
    }
}

/// Drives ordered walks over source collections.
pub struct Traversal<'a> {
    http: &'a dyn HttpClient,
    page_size: usize,
}

impl<'a> Traversal<'a> {
    pub fn new(http: &'a dyn HttpClient, page_size: usize) -> Self {
        Self {
            http,
            page_size: page_size.max(1),
        }
    }

    /// Visit every record of `collection`, one at a time, in source order.
    ///
    /// A non-success page status or an unreadable page aborts with
    /// `SyncError::Fetch`; a handler error aborts immediately and no
    /// further record is handled. Returns the number of records visited.
    pub async fn traverse<T, F, Fut>(&self, collection: &Collection, mut per_item: F) -> SyncResult<usize>
    where
        T: DeserializeOwned + Send,
        F: FnMut(T) -> Fut + Send,
        Fut: Future<Output = SyncResult<()>> + Send,
    {
        let pagination = collection.pagination;
        let mut cursor = pagination.origin();
        let mut visited = 0;

        loop {
            let query = pagination
                .page_query(cursor, self.page_size)
                .merged(&collection.params);
            debug!(path = %collection.path, ?query, "requesting page");

            let request = HttpRequest::get(&collection.path).with_query(query);
            let response = self.http.send(request).await?;
            let page: Page<T> = pagination
                .decode(&response, self.page_size)
                .map_err(|reason| SyncError::Fetch {
                    url: collection.path.clone(),
                    reason,
                })?;

            info!(
                "Selected {} entities from {} (cursor {})",
                page.records.len(),
                collection.path,
                cursor
            );

            for record in page.records {
                per_item(record).await?;
                visited += 1;
            }

            if !page.has_more {
                break;
            }
            cursor = pagination.advance(cursor, self.page_size);
        }

        Ok(visited)
    }
}
