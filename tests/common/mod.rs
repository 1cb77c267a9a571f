//! Shared fakes for integration tests
//!
//! `FakeDestination` keeps entities in memory the way the destination
//! platform does: it assigns ids, answers the remote-key filter and
//! distinguishes create (201) from replace (200). `PagedSource` serves
//! fixture records through either paging style.

#![allow(dead_code)]

use async_trait::async_trait;
use content_migrator::destination::{EndpointTable, EntityKind};
use content_migrator::{
    DestinationClient, HttpClient, HttpRequest, HttpResponse, Method, Pagination, ReferenceCache,
    RemoteKeyNamespace, TransportError,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

fn id_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct StoredEntity {
    pub id: i64,
    pub body: Value,
}

impl StoredEntity {
    pub fn remote_key(&self) -> &str {
        self.body["remote_key"].as_str().unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.body["title"].as_str().unwrap_or_default()
    }
}

#[derive(Default)]
struct DestinationState {
    next_id: i64,
    /// view → entities in creation order
    entities: HashMap<String, Vec<StoredEntity>>,
    links: Vec<(i64, i64)>,
    requests: Vec<HttpRequest>,
    rejected_keys: HashSet<String>,
}

/// In-memory destination platform.
pub struct FakeDestination {
    endpoints: EndpointTable,
    state: Mutex<DestinationState>,
}

impl FakeDestination {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            endpoints: EndpointTable::default(),
            state: Mutex::new(DestinationState {
                next_id: 100,
                ..DestinationState::default()
            }),
        })
    }

    /// Answer creates of this namespaced remote key with a 500.
    pub fn reject_create(&self, remote_key: &str) {
        self.state
            .lock()
            .unwrap()
            .rejected_keys
            .insert(remote_key.to_string());
    }

    fn view(&self, kind: EntityKind) -> &str {
        &self.endpoints.endpoint(kind).view
    }

    pub fn entities(&self, kind: EntityKind) -> Vec<StoredEntity> {
        let view = self.view(kind).to_string();
        self.state
            .lock()
            .unwrap()
            .entities
            .get(&view)
            .cloned()
            .unwrap_or_default()
    }

    pub fn entity(&self, kind: EntityKind, remote_key: &str) -> Option<StoredEntity> {
        self.entities(kind)
            .into_iter()
            .find(|e| e.remote_key() == remote_key)
    }

    pub fn links(&self) -> Vec<(i64, i64)> {
        self.state.lock().unwrap().links.clone()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn count(&self, method: Method, task: Option<&str>) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.query.get("task") == task)
            .count()
    }

    pub fn client(self: &Arc<Self>, label: &str) -> DestinationClient {
        DestinationClient::new(
            self.clone(),
            RemoteKeyNamespace::new(label),
            Arc::new(ReferenceCache::new()),
        )
    }

    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let mut state = self.state.lock().unwrap();
        let view = request.query.get("view").unwrap_or_default().to_string();
        let body = request.body.clone().unwrap_or(Value::Null);

        match (request.method, request.query.get("task")) {
            (Method::Get, _) => {
                let filter = request.query.get("filter[remote_key]").unwrap_or_default();
                let items: Vec<Value> = state
                    .entities
                    .get(&view)
                    .map(|list| {
                        list.iter()
                            .filter(|e| e.remote_key() == filter)
                            .map(|e| json!({ "id": e.id.to_string(), "remote_key": e.remote_key() }))
                            .collect()
                    })
                    .unwrap_or_default();
                HttpResponse::json(200, json!({ "_embedded": { "item": items } }))
            }
            (Method::Post, Some("addTag")) => {
                match (id_of(&body["content_id"]), id_of(&body["tag_id"])) {
                    (Some(content), Some(tag)) => {
                        state.links.push((content, tag));
                        HttpResponse::json(200, json!({ "result": true }))
                    }
                    _ => HttpResponse::json(400, json!({ "result": false })),
                }
            }
            (Method::Post, _) => {
                let remote_key = body["remote_key"].as_str().unwrap_or_default().to_string();
                if state.rejected_keys.contains(&remote_key) {
                    return HttpResponse::json(500, json!({ "result": false }));
                }
                let id = state.next_id;
                state.next_id += 1;
                state
                    .entities
                    .entry(view)
                    .or_default()
                    .push(StoredEntity { id, body });
                HttpResponse::json(201, json!({ "result": true, "id": id }))
            }
            (Method::Put, _) => {
                let Some(id) = id_of(&body["id"]) else {
                    return HttpResponse::json(400, json!({ "result": false }));
                };
                let stored = state
                    .entities
                    .get_mut(&view)
                    .and_then(|list| list.iter_mut().find(|e| e.id == id));
                match stored {
                    Some(entity) => {
                        entity.body = body;
                        HttpResponse::json(200, json!({ "result": true, "id": id }))
                    }
                    None => HttpResponse::json(404, json!({ "result": false })),
                }
            }
        }
    }
}

#[async_trait]
impl HttpClient for FakeDestination {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self.handle(&request);
        self.state.lock().unwrap().requests.push(request);
        Ok(response)
    }
}

/// A field filter: query parameter → record field it must equal.
type Filter = (&'static str, &'static str);

struct SourceCollection {
    records: Vec<Value>,
    filter: Option<Filter>,
}

/// Fixture-backed source API serving one paging style.
pub struct PagedSource {
    pagination: Pagination,
    collections: HashMap<String, SourceCollection>,
    details: HashMap<String, Value>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl PagedSource {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            pagination,
            collections: HashMap::new(),
            details: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_collection(mut self, path: &str, records: Vec<Value>) -> Self {
        self.collections
            .insert(path.to_string(), SourceCollection { records, filter: None });
        self
    }

    /// Only serve records whose `field` equals the `param` query value.
    pub fn with_filtered_collection(
        mut self,
        path: &str,
        records: Vec<Value>,
        param: &'static str,
        field: &'static str,
    ) -> Self {
        self.collections.insert(
            path.to_string(),
            SourceCollection {
                records,
                filter: Some((param, field)),
            },
        );
        self
    }

    pub fn with_detail(mut self, path: &str, body: Value) -> Self {
        self.details.insert(path.to_string(), body);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, path: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    fn param(request: &HttpRequest, key: &str, default: usize) -> usize {
        request
            .query
            .get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        if let Some(detail) = self.details.get(&request.path) {
            return HttpResponse::json(200, detail.clone());
        }
        let Some(collection) = self.collections.get(&request.path) else {
            return HttpResponse::empty(404);
        };

        let records: Vec<&Value> = collection
            .records
            .iter()
            .filter(|record| match collection.filter {
                Some((param, field)) => {
                    let wanted = request.query.get(param).unwrap_or_default();
                    match &record[field] {
                        Value::String(s) => s == wanted,
                        other => other.to_string() == wanted,
                    }
                }
                None => true,
            })
            .collect();

        match self.pagination {
            Pagination::NextLink => {
                let limit = Self::param(request, "page[limit]", 20);
                let offset = Self::param(request, "page[offset]", 0);
                let data: Vec<&Value> = records.iter().skip(offset).take(limit).copied().collect();
                let mut links = json!({ "self": request.path });
                if offset + limit < records.len() {
                    links["next"] = json!(format!("{}?page[offset]={}", request.path, offset + limit));
                }
                HttpResponse::json(200, json!({ "data": data, "links": links }))
            }
            Pagination::ShortPage => {
                let per_page = Self::param(request, "per_page", 10);
                let page = Self::param(request, "page", 1);
                let data: Vec<&Value> = records
                    .iter()
                    .skip((page - 1) * per_page)
                    .take(per_page)
                    .copied()
                    .collect();
                HttpResponse::json(200, json!(data))
            }
        }
    }
}

#[async_trait]
impl HttpClient for PagedSource {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self.handle(&request);
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }
}
