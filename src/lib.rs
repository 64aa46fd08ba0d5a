//! liblod: a Linked Open Data client
//!
//! Fetches RDF descriptions of resources over HTTP (with content
//! negotiation, redirects and HTML `<link rel="alternate">` discovery),
//! indexes the resulting statements by subject, and answers predicate
//! queries ordered by language preference.
//!
//! # Modules
//!
//! - [`rdf`]: terms, statements, prefixes, Turtle and RDF/XML codecs
//! - [`fetch`]: concurrent HTTP fetching into [`LodResponse`]s
//! - [`lod`]: the [`Lod`] context, instances and the query engine
//! - [`config`]: YAML-loadable settings
//!
//! ## Example Usage
//!
//! ```rust
//! use liblod::Lod;
//!
//! let mut lod = Lod::new().unwrap();
//! lod.load_rdf(
//!     r#"<http://example.org/paris> <http://www.w3.org/2000/01/rdf-schema#label> "Paris"@en, "Paris"@fr ."#,
//!     "text/turtle",
//! );
//!
//! let paris = lod.locate("http://example.org/paris").unwrap();
//! let label = lod.filter(paris, "rdfs:label");
//! assert_eq!(label.to_string(), "Paris");
//! assert_eq!(label.first().and_then(|t| t.language()), Some("en"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod fetch;
pub mod lod;
pub mod rdf;

// Re-export main types for convenience
pub use config::{HttpClientConfig, LodConfig};

pub use error::{LodError, LodResult};

pub use fetch::{FetchError, Fetcher, HttpClient, LodResponse, RequestSpec};

pub use lod::{FilteredLodInstance, Lod, LodInstance};

pub use rdf::{
    LodLiteral, LodResource, LodStatement, LodTerm, ObjectSpec,
    PrefixMap, RdfFormat, RdfParser, RioParser,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
