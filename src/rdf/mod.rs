//! RDF data model for the LOD client
//!
//! This module provides:
//! - Terms (resources and literals) and statements with de-duplication keys
//! - Prefix registry with a built-in table of common vocabularies
//! - Parsers for Turtle and RDF/XML, and a Turtle serializer
//!
//! # Example
//!
//! ```rust
//! use liblod::rdf::{LodStatement, ObjectSpec, PrefixMap};
//!
//! let prefixes = PrefixMap::new();
//! let statement = LodStatement::new(
//!     "http://example.org/alice",
//!     "foaf:name",
//!     ObjectSpec::literal("Alice").lang("en"),
//!     &prefixes,
//! );
//!
//! assert_eq!(statement.predicate().as_str(), "http://xmlns.com/foaf/0.1/name");
//! ```

mod namespace;
mod serialization;
mod types;

pub use types::{
    LiteralTag, LodLiteral, LodResource, LodStatement, LodTerm,
    ObjectKind, ObjectSpec, StatementObject,
};

pub use namespace::{common_prefix, PrefixMap, COMMON_PREFIXES};

pub use serialization::{
    RdfFormat, RdfParser, RioParser,
    RdfXmlParserWrapper, TurtleParserWrapper, TurtleSerializerWrapper,
    ParseError, ParseResult,
    SerializeError, SerializeResult,
};
