//! RDF serialization formats
//!
//! Supports:
//! - Turtle (parse and serialize)
//! - RDF/XML (parse)

mod rdfxml;
mod turtle;

pub use rdfxml::RdfXmlParserWrapper;
pub use turtle::{TurtleParserWrapper, TurtleSerializerWrapper};

use super::{LodLiteral, LodResource, LodStatement, LodTerm};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// RDF/XML format (.rdf)
    RdfXml,
}

impl RdfFormat {
    /// Match a MIME type by prefix, so parameters like `;charset=utf-8` are
    /// ignored
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let media_type = media_type.trim().to_ascii_lowercase();
        if media_type.starts_with("text/turtle") {
            Some(RdfFormat::Turtle)
        } else if media_type.starts_with("application/rdf+xml") {
            Some(RdfFormat::RdfXml)
        } else {
            None
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            RdfFormat::Turtle => "text/turtle",
            RdfFormat::RdfXml => "application/rdf+xml",
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// Malformed Turtle
    #[error("Turtle parse error: {0}")]
    Turtle(#[from] rio_turtle::TurtleError),

    /// Malformed RDF/XML
    #[error("RDF/XML parse error: {0}")]
    RdfXml(#[from] rio_xml::RdfXmlError),

    /// No parser for this MIME type
    #[error("No parser for content type {0}")]
    UnsupportedMediaType(String),

    /// Valid input using a construct this model cannot represent
    #[error("Unsupported RDF construct: {0}")]
    Unsupported(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// Parses RDF text of a given MIME type into statements.
pub trait RdfParser: Send + Sync {
    /// `base_iri` resolves relative IRIs in the document, when known.
    fn parse(
        &self,
        input: &str,
        media_type: &str,
        base_iri: Option<&str>,
    ) -> ParseResult<Vec<LodStatement>>;
}

/// Default parser backed by rio_turtle and rio_xml
#[derive(Debug, Clone, Copy, Default)]
pub struct RioParser;

impl RdfParser for RioParser {
    fn parse(
        &self,
        input: &str,
        media_type: &str,
        base_iri: Option<&str>,
    ) -> ParseResult<Vec<LodStatement>> {
        match RdfFormat::from_media_type(media_type) {
            Some(RdfFormat::Turtle) => TurtleParserWrapper::parse(input, base_iri),
            Some(RdfFormat::RdfXml) => RdfXmlParserWrapper::parse(input, base_iri),
            None => Err(ParseError::UnsupportedMediaType(media_type.to_string())),
        }
    }
}

fn parse_base_iri(base_iri: Option<&str>) -> Option<oxiri::Iri<String>> {
    let base = base_iri?;
    match oxiri::Iri::parse(base.to_string()) {
        Ok(iri) => Some(iri),
        Err(e) => {
            tracing::warn!("Ignoring invalid base IRI {}: {}", base, e);
            None
        }
    }
}

/// Blank node label prefix for one parsed document.
///
/// Derived from the document text and base IRI: the same document always
/// gets the same scope (so re-loading it de-duplicates), while two documents
/// that both say `_:b0` get distinct nodes.
fn blank_scope(input: &str, base_iri: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(base_iri.unwrap_or_default().as_bytes());
    hasher.update([0u8]);
    hasher.update(input.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("d{}", &digest[..12])
}

/// Convert a rio triple into a statement; blank nodes become
/// `_:<scope>_<label>` resources
fn convert_triple(t: rio_api::model::Triple<'_>, scope: &str) -> ParseResult<LodStatement> {
    use rio_api::model::{Literal, Subject, Term};

    let subject = match t.subject {
        Subject::NamedNode(n) => LodResource::new(n.iri),
        Subject::BlankNode(b) => LodResource::new(format!("_:{}_{}", scope, b.id)),
        _ => return Err(ParseError::Unsupported("quoted triple as subject".to_string())),
    };

    let predicate = LodResource::new(t.predicate.iri);

    let object = match t.object {
        Term::NamedNode(n) => LodTerm::Resource(LodResource::new(n.iri)),
        Term::BlankNode(b) => LodTerm::Resource(LodResource::new(format!("_:{}_{}", scope, b.id))),
        Term::Literal(Literal::Simple { value }) => LodLiteral::new(value).into(),
        Term::Literal(Literal::LanguageTaggedString { value, language }) => {
            LodLiteral::with_language(value, language).into()
        }
        Term::Literal(Literal::Typed { value, datatype }) => {
            LodLiteral::with_datatype(value, datatype.iri).into()
        }
        _ => return Err(ParseError::Unsupported("quoted triple as object".to_string())),
    };

    Ok(LodStatement::from_parts(subject, predicate, object))
}
