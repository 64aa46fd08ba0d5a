//! HTTP client for LOD resolution

use super::link::{extract_rdf_alternate_link, resolve_reference};
use super::{FetchError, Fetcher, LodResponse, RequestSpec};
use crate::config::HttpClientConfig;
use crate::error::LodResult;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::header::{ACCEPT, CONTENT_LOCATION, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

/// What to do with one completed request
enum Outcome {
    /// Terminal response for the slot
    Done(LodResponse),
    /// HTML page pointed at an RDF variant; fetch this URI next
    Follow(String),
}

/// Concurrent HTTP fetcher with content negotiation, redirect following and
/// HTML → RDF link indirection
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new client based on configuration
    pub fn new(config: HttpClientConfig) -> LodResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .redirect(Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    async fn fetch_one(&self, spec: &RequestSpec) -> Outcome {
        debug!("GET {} (for {})", spec.uri, spec.original_uri);

        let response = match self
            .client
            .get(&spec.uri)
            .header(ACCEPT, self.config.accept.as_str())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_redirect() => {
                warn!("Too many redirects fetching {}", spec.uri);
                return Outcome::Done(LodResponse::failure(
                    &spec.original_uri,
                    0,
                    FetchError::TooManyRedirects(self.config.max_redirects),
                ));
            }
            Err(e) => {
                warn!("Request to {} failed: {}", spec.uri, e);
                return Outcome::Done(LodResponse::failure(
                    &spec.original_uri,
                    0,
                    FetchError::Transport(e.to_string()),
                ));
            }
        };

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        if status.is_server_error() {
            return Outcome::Done(LodResponse::failure(
                &spec.original_uri,
                status.as_u16(),
                FetchError::ServerError { status: status.as_u16(), reason },
            ));
        }
        if status.is_client_error() {
            return Outcome::Done(LodResponse::failure(
                &spec.original_uri,
                status.as_u16(),
                FetchError::ClientError { status: status.as_u16(), reason },
            ));
        }

        let media_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let Some(media_type) = media_type else {
            return Outcome::Done(LodResponse::failure(
                &spec.original_uri,
                status.as_u16(),
                FetchError::NoContentType,
            ));
        };

        let final_url = response.url().to_string();
        let content_location = response
            .headers()
            .get(CONTENT_LOCATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|location| resolve_reference(location, &final_url))
            .unwrap_or_else(|| final_url.clone());

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Reading body of {} failed: {}", spec.uri, e);
                return Outcome::Done(LodResponse::failure(
                    &spec.original_uri,
                    status.as_u16(),
                    FetchError::Transport(e.to_string()),
                ));
            }
        };

        if status == StatusCode::OK && is_html(&media_type) {
            return match extract_rdf_alternate_link(&body, &final_url) {
                Some(link) => Outcome::Follow(link),
                None => Outcome::Done(LodResponse::failure(
                    &spec.original_uri,
                    status.as_u16(),
                    FetchError::NoRdfLink,
                )),
            };
        }

        Outcome::Done(LodResponse {
            target: spec.original_uri.clone(),
            content_location: Some(content_location),
            status: status.as_u16(),
            error: None,
            media_type: Some(media_type),
            payload: Some(body),
        })
    }
}

fn is_html(media_type: &str) -> bool {
    media_type
        .parse::<mime::Mime>()
        .is_ok_and(|m| m.essence_str() == mime::TEXT_HTML.essence_str())
}

#[async_trait]
impl Fetcher for HttpClient {
    /// Resolve every request; `result[i]` always answers `requests[i]`.
    ///
    /// Requests answered by an HTML page with an RDF alternate link are
    /// re-issued against that link in a further pass, at most
    /// `max_redirects` passes deep.
    async fn get_all(&self, requests: Vec<RequestSpec>) -> Vec<LodResponse> {
        let max_hops = self.config.max_redirects;
        let mut slots: Vec<Option<LodResponse>> = vec![None; requests.len()];
        let mut pending: Vec<(usize, RequestSpec)> = requests.into_iter().enumerate().collect();
        let mut hops = 0;

        info!("Fetching {} URI(s)", pending.len());

        while !pending.is_empty() {
            if hops > max_hops {
                for (slot, spec) in pending.drain(..) {
                    warn!("Giving up on {} after {} HTML indirections", spec.original_uri, max_hops);
                    slots[slot] = Some(LodResponse::failure(
                        spec.original_uri,
                        0,
                        FetchError::TooManyIndirections(max_hops),
                    ));
                }
                break;
            }

            let outcomes: Vec<(usize, RequestSpec, Outcome)> = stream::iter(pending)
                .map(|(slot, spec)| async move {
                    let outcome = self.fetch_one(&spec).await;
                    (slot, spec, outcome)
                })
                .buffer_unordered(self.config.concurrency)
                .collect()
                .await;

            pending = Vec::new();
            for (slot, spec, outcome) in outcomes {
                match outcome {
                    Outcome::Done(response) => slots[slot] = Some(response),
                    Outcome::Follow(link) => {
                        debug!("{} advertises RDF at {}", spec.uri, link);
                        pending.push((slot, RequestSpec {
                            uri: link,
                            original_uri: spec.original_uri,
                        }));
                    }
                }
            }
            hops += 1;
        }

        slots.into_iter().flatten().collect()
    }
}
