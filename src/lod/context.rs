//! The `Lod` context: index of instances plus the fetch/ingest glue

use super::instance::{FilteredLodInstance, LodInstance};
use super::query::{OWL_SAME_AS, RDF_TYPE};
use crate::config::LodConfig;
use crate::error::LodResult;
use crate::fetch::{FetchError, Fetcher, HttpClient, LodResponse, RequestSpec};
use crate::rdf::{LodStatement, PrefixMap, RdfParser, RioParser, TurtleSerializerWrapper};
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Linked Open Data context.
///
/// Holds every instance fetched or loaded so far, keyed by subject URI, the
/// prefix map and language preferences used when querying them, and the
/// outcome of the most recent fetch or load.
///
/// All mutating operations take `&mut self`; wrap in
/// `Arc<tokio::sync::RwLock<Lod>>` to share between tasks.
pub struct Lod {
    index: IndexMap<String, LodInstance>,
    languages: Vec<String>,
    prefixes: PrefixMap,

    // Outcome of the last processed response
    subject: Option<String>,
    document: Option<String>,
    status: u16,
    last_error: Option<FetchError>,

    fetcher: Arc<dyn Fetcher>,
    parser: Arc<dyn RdfParser>,
}

impl Lod {
    /// Context with default configuration and the built-in HTTP client
    pub fn new() -> LodResult<Self> {
        Self::with_config(LodConfig::default())
    }

    /// Context built from `config`
    pub fn with_config(config: LodConfig) -> LodResult<Self> {
        let client = HttpClient::new(config.http.clone())?;
        Ok(Self::with_collaborators(config, Arc::new(client), Arc::new(RioParser)))
    }

    /// Context with caller-supplied fetcher and parser
    pub fn with_collaborators(
        config: LodConfig,
        fetcher: Arc<dyn Fetcher>,
        parser: Arc<dyn RdfParser>,
    ) -> Self {
        let mut prefixes = PrefixMap::new();
        prefixes.extend(config.prefixes);

        Self {
            index: IndexMap::new(),
            languages: config.languages,
            prefixes,
            subject: None,
            document: None,
            status: 0,
            last_error: None,
            fetcher,
            parser,
        }
    }

    /// Register (or override) a namespace prefix
    pub fn set_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.set(prefix, iri);
    }

    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    /// Replace the language preference list, most preferred first
    pub fn set_languages<I, S>(&mut self, languages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Subject URI of the last successfully processed response
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Document URI (content location) of the last successful response
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// HTTP status of the last processed response
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Error code of the last processed response, 0 on success
    pub fn error(&self) -> u32 {
        self.last_error.as_ref().map_or(0, FetchError::code)
    }

    /// Error message of the last processed response
    pub fn err_msg(&self) -> Option<String> {
        self.last_error.as_ref().map(ToString::to_string)
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Look up an indexed instance without touching the network
    pub fn locate(&self, uri: &str) -> Option<&LodInstance> {
        self.index.get(uri)
    }

    /// True if `uri` has an instance in the index
    pub fn is_indexed(&self, uri: &str) -> bool {
        self.index.contains_key(uri)
    }

    pub fn instances(&self) -> impl Iterator<Item = &LodInstance> {
        self.index.values()
    }

    /// Number of indexed instances
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Fetch `uri` over the network, merge the result into the index and
    /// return the instance for `uri` if one now exists.
    ///
    /// Fetching a document can succeed without producing statements about
    /// `uri` itself; that case returns `None` with `error() == 0`.
    pub async fn fetch(&mut self, uri: &str) -> Option<&LodInstance> {
        let fetcher = Arc::clone(&self.fetcher);
        let response = fetcher.get(uri).await;

        if !self.process(response) {
            return None;
        }
        self.locate(uri)
    }

    /// Return the indexed instance for `uri`, fetching it first if needed
    pub async fn resolve(&mut self, uri: &str) -> Option<&LodInstance> {
        if self.index.contains_key(uri) {
            debug!("{} already indexed", uri);
            return self.locate(uri);
        }
        self.fetch(uri).await
    }

    /// Fetch a batch of URIs concurrently and ingest every response in
    /// input order. Returns true only if every response succeeded.
    ///
    /// The last-operation fields reflect the final response processed.
    pub async fn fetch_all<S>(&mut self, uris: &[S]) -> bool
    where
        S: AsRef<str> + Sync,
    {
        let requests: Vec<RequestSpec> = uris.iter().map(|u| RequestSpec::new(u.as_ref())).collect();
        let fetcher = Arc::clone(&self.fetcher);
        let responses = fetcher.get_all(requests).await;

        let total = responses.len();
        let mut failed = 0;
        for response in responses {
            if !self.process(response) {
                failed += 1;
            }
        }

        info!("Fetched {} URI(s), {} failed", total, failed);
        failed == 0
    }

    /// Resolve `uri` and report whether an instance for it exists
    pub async fn contains(&mut self, uri: &str) -> bool {
        self.resolve(uri).await.is_some()
    }

    /// Parse `rdf` and merge its statements into the index
    pub fn load_rdf(&mut self, rdf: &str, media_type: &str) -> bool {
        self.load_rdf_with_base(rdf, media_type, None)
    }

    /// Parse `rdf`, resolving relative IRIs against `base_iri`, and merge its
    /// statements into the index. Returns false if the document could not be
    /// parsed; the index is then unchanged.
    pub fn load_rdf_with_base(&mut self, rdf: &str, media_type: &str, base_iri: Option<&str>) -> bool {
        match self.parser.parse(rdf, media_type, base_iri) {
            Ok(statements) => {
                let parsed = statements.len();
                let added = self.merge(statements);
                debug!("Merged {} new statement(s) of {} parsed", added, parsed);
                true
            }
            Err(e) => {
                warn!("Failed to parse {} document: {}", media_type, e);
                false
            }
        }
    }

    /// Merge statements into per-subject instances; returns how many were new
    pub fn merge(&mut self, statements: impl IntoIterator<Item = LodStatement>) -> usize {
        let mut added = 0;
        for statement in statements {
            let instance = self
                .index
                .entry(statement.subject().as_str().to_string())
                .or_insert_with_key(|uri| LodInstance::new(uri.clone()));
            if instance.add(statement) {
                added += 1;
            }
        }
        added
    }

    /// Record the outcome of `response` and ingest its payload
    fn process(&mut self, response: LodResponse) -> bool {
        self.status = response.status;
        self.last_error = response.error.clone();

        if let Some(error) = &response.error {
            warn!("Fetching {} failed: {}", response.target, error);
            return false;
        }

        self.subject = Some(response.target);
        self.document = response.content_location;

        let (Some(payload), Some(media_type)) = (response.payload, response.media_type) else {
            return false;
        };

        let base = self.document.clone();
        self.load_rdf_with_base(&payload, &media_type, base.as_deref())
    }

    /// Run a predicate query against `instance` using this context's
    /// prefixes and language preferences
    pub fn filter<'a>(&self, instance: &'a LodInstance, query: &str) -> FilteredLodInstance<'a> {
        instance.filter_with(query, &self.prefixes, &self.languages)
    }

    /// True if `instance` has an `rdf:type` equal to any of `types`
    /// (short or full form)
    pub fn has_type(&self, instance: &LodInstance, types: &[&str]) -> bool {
        let declared = self.filter(instance, RDF_TYPE);
        types
            .iter()
            .map(|t| self.prefixes.expand(t))
            .any(|expanded| declared.objects().any(|term| term.value() == expanded))
    }

    /// True if `instance` has at least one statement matching `query`
    pub fn has_predicate(&self, instance: &LodInstance, query: &str) -> bool {
        !self.filter(instance, query).is_empty()
    }

    /// True if the instance's subject is present in the index
    pub fn exists(&self, instance: &LodInstance) -> bool {
        self.is_indexed(instance.uri())
    }

    /// Subjects of every indexed `?s owl:sameAs <uri>` statement
    pub fn get_same_as(&self, uri: &str) -> IndexSet<String> {
        self.index
            .values()
            .flat_map(LodInstance::iter)
            .filter(|s| s.predicate().as_str() == OWL_SAME_AS)
            .filter(|s| s.object().is_resource() && s.object().value() == uri)
            .map(|s| s.subject().as_str().to_string())
            .collect()
    }

    /// Serialize the whole index as Turtle
    pub fn to_turtle(&self) -> LodResult<String> {
        let statements = self.index.values().flat_map(LodInstance::iter);
        Ok(TurtleSerializerWrapper::serialize(statements, &self.prefixes)?)
    }

    /// Serialize one instance as Turtle
    pub fn instance_to_turtle(&self, instance: &LodInstance) -> LodResult<String> {
        Ok(TurtleSerializerWrapper::serialize(instance, &self.prefixes)?)
    }
}
