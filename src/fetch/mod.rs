//! Fetch pipeline
//!
//! Resolves batches of URIs into [`LodResponse`]s: concurrent GETs with a
//! fixed content-negotiation preference, transparent redirects, and a second
//! hop for HTML pages that link to an RDF variant.

mod client;
mod link;
mod response;

pub use client::HttpClient;
pub use link::extract_rdf_alternate_link;
pub use response::{FetchError, LodResponse};

use async_trait::async_trait;

/// One request in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// URI to GET
    pub uri: String,
    /// URI the caller originally asked for; responses are keyed by it
    pub original_uri: String,
}

impl RequestSpec {
    pub fn new(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        Self {
            original_uri: uri.clone(),
            uri,
        }
    }
}

impl From<&str> for RequestSpec {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for RequestSpec {
    fn from(uri: String) -> Self {
        Self::new(uri)
    }
}

/// Source of LOD responses.
///
/// Individual failures are reported in the returned responses, never as an
/// early return.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a batch; the result has one response per request, in order
    async fn get_all(&self, requests: Vec<RequestSpec>) -> Vec<LodResponse>;

    /// Fetch a single URI
    async fn get(&self, uri: &str) -> LodResponse {
        let mut responses = self.get_all(vec![RequestSpec::new(uri)]).await;
        if responses.is_empty() {
            return LodResponse::failure(uri, 0, FetchError::Transport("no response".to_string()));
        }
        responses.swap_remove(0)
    }
}
