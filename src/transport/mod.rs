//! HTTP transport for source and destination systems
//!
//! Everything above this layer speaks `HttpRequest`/`HttpResponse`
//! through the `HttpClient` trait; `ReqwestClient` is the network
//! implementation.

mod http;
mod query;
mod traits;

pub use http::ReqwestClient;
pub use query::QueryParams;
pub use traits::{HttpClient, HttpRequest, HttpResponse, Method};
