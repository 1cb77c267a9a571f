//! reqwest-backed HttpClient

use super::traits::{HttpClient, HttpRequest, HttpResponse, Method};
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

const USER_AGENT: &str = concat!("content-migrator/", env!("CARGO_PKG_VERSION"));

/// An HttpClient talking to one base URL, optionally with a bearer token.
pub struct ReqwestClient {
    inner: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl ReqwestClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TransportError::InvalidUrl(base_url));
        }
        let inner = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: None,
        })
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(&request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self
            .inner
            .request(method, &url)
            .header(ACCEPT, "*/*")
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .query(request.query.pairs());
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if text.trim().is_empty() {
            return Ok(HttpResponse::empty(status));
        }
        // Error pages are often HTML; the caller still decides on the status.
        match serde_json::from_str(&text) {
            Ok(body) => Ok(HttpResponse::new(status, Some(body))),
            Err(e) => {
                debug!(%url, status, error = %e, "response body is not JSON");
                Ok(HttpResponse::empty(status))
            }
        }
    }
}
