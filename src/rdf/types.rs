//! RDF term and statement types
//!
//! Terms are kept as plain strings: resources carry a URI (or a `_:` blank
//! node label), literals carry a lexical value plus at most one of a language
//! tag or a datatype URI.

use super::namespace::PrefixMap;
use sha2::{Digest, Sha256};
use std::fmt;

/// An RDF resource identified by a URI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LodResource(String);

impl LodResource {
    /// Wrap a URI without prefix expansion
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Wrap a URI, expanding `prefix:local` shorthand first
    pub fn expanded(uri: &str, prefixes: &PrefixMap) -> Self {
        Self(prefixes.expand(uri))
    }

    /// Get the URI string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this resource is a blank node label (`_:id`)
    pub fn is_blank(&self) -> bool {
        self.0.starts_with("_:")
    }
}

impl AsRef<str> for LodResource {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LodResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Language or datatype annotation of a literal.
///
/// A literal has at most one of the two.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LiteralTag {
    /// Plain literal
    #[default]
    None,
    /// Language-tagged literal, e.g. `en-gb`
    Language(String),
    /// Typed literal; holds the full datatype URI
    Datatype(String),
}

/// An RDF literal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LodLiteral {
    value: String,
    tag: LiteralTag,
}

impl LodLiteral {
    /// Create a plain literal
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tag: LiteralTag::None,
        }
    }

    /// Create a language-tagged literal
    pub fn with_language(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tag: LiteralTag::Language(language.into()),
        }
    }

    /// Create a typed literal; `datatype` must already be a full URI
    pub fn with_datatype(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tag: LiteralTag::Datatype(datatype.into()),
        }
    }

    /// Build a literal from optional language and datatype.
    ///
    /// When both are supplied the language wins and the datatype is dropped.
    pub fn from_parts(
        value: impl Into<String>,
        language: Option<&str>,
        datatype: Option<&str>,
    ) -> Self {
        match (language, datatype) {
            (Some(lang), _) => Self::with_language(value, lang),
            (None, Some(dt)) => Self::with_datatype(value, dt),
            (None, None) => Self::new(value),
        }
    }

    /// Lexical value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Language tag, if any
    pub fn language(&self) -> Option<&str> {
        match &self.tag {
            LiteralTag::Language(lang) => Some(lang),
            _ => None,
        }
    }

    /// Datatype URI, if any
    pub fn datatype(&self) -> Option<&str> {
        match &self.tag {
            LiteralTag::Datatype(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn tag(&self) -> &LiteralTag {
        &self.tag
    }
}

/// An RDF term in object position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LodTerm {
    /// Resource (URI or blank node)
    Resource(LodResource),
    /// Literal value
    Literal(LodLiteral),
}

impl LodTerm {
    /// Check if this term is a resource
    pub fn is_resource(&self) -> bool {
        matches!(self, LodTerm::Resource(_))
    }

    /// URI for a resource, lexical value for a literal
    pub fn value(&self) -> &str {
        match self {
            LodTerm::Resource(r) => r.as_str(),
            LodTerm::Literal(l) => l.value(),
        }
    }

    /// Language tag of a literal; always `None` for resources
    pub fn language(&self) -> Option<&str> {
        match self {
            LodTerm::Resource(_) => None,
            LodTerm::Literal(l) => l.language(),
        }
    }

    pub fn as_literal(&self) -> Option<&LodLiteral> {
        match self {
            LodTerm::Literal(l) => Some(l),
            LodTerm::Resource(_) => None,
        }
    }
}

impl fmt::Display for LodTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl From<LodResource> for LodTerm {
    fn from(resource: LodResource) -> Self {
        LodTerm::Resource(resource)
    }
}

impl From<LodLiteral> for LodTerm {
    fn from(literal: LodLiteral) -> Self {
        LodTerm::Literal(literal)
    }
}

/// Kind of object described by an [`ObjectSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Uri,
    Literal,
}

/// Raw object description: `{value, kind, datatype?, lang?}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSpec {
    pub value: String,
    pub kind: ObjectKind,
    pub datatype: Option<String>,
    pub lang: Option<String>,
}

impl ObjectSpec {
    /// Object resource; the value may use `prefix:local` shorthand
    pub fn uri(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: ObjectKind::Uri,
            datatype: None,
            lang: None,
        }
    }

    /// Plain literal object
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: ObjectKind::Literal,
            datatype: None,
            lang: None,
        }
    }

    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    #[must_use]
    pub fn datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    /// Normalize into a term, expanding URI values and datatypes
    pub fn into_term(self, prefixes: &PrefixMap) -> LodTerm {
        match self.kind {
            ObjectKind::Uri => LodTerm::Resource(LodResource::expanded(&self.value, prefixes)),
            ObjectKind::Literal => {
                let datatype = self.datatype.as_deref().map(|dt| prefixes.expand(dt));
                LodTerm::Literal(LodLiteral::from_parts(
                    self.value,
                    self.lang.as_deref(),
                    datatype.as_deref(),
                ))
            }
        }
    }
}

/// Object argument for [`LodStatement::new`]: a ready term or a raw spec
#[derive(Debug, Clone)]
pub enum StatementObject {
    Term(LodTerm),
    Spec(ObjectSpec),
}

impl From<LodTerm> for StatementObject {
    fn from(term: LodTerm) -> Self {
        StatementObject::Term(term)
    }
}

impl From<LodResource> for StatementObject {
    fn from(resource: LodResource) -> Self {
        StatementObject::Term(resource.into())
    }
}

impl From<LodLiteral> for StatementObject {
    fn from(literal: LodLiteral) -> Self {
        StatementObject::Term(literal.into())
    }
}

impl From<ObjectSpec> for StatementObject {
    fn from(spec: ObjectSpec) -> Self {
        StatementObject::Spec(spec)
    }
}

/// An immutable subject-predicate-object triple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LodStatement {
    subject: LodResource,
    predicate: LodResource,
    object: LodTerm,
}

impl LodStatement {
    /// Build a statement, expanding prefixed subject and predicate through
    /// `prefixes`. Object specs are expanded too; ready-made terms are kept
    /// as given.
    pub fn new(
        subject: impl AsRef<str>,
        predicate: impl AsRef<str>,
        object: impl Into<StatementObject>,
        prefixes: &PrefixMap,
    ) -> Self {
        let object = match object.into() {
            StatementObject::Term(term) => term,
            StatementObject::Spec(spec) => spec.into_term(prefixes),
        };

        Self {
            subject: LodResource::expanded(subject.as_ref(), prefixes),
            predicate: LodResource::expanded(predicate.as_ref(), prefixes),
            object,
        }
    }

    /// Build a statement from already-absolute terms
    pub fn from_parts(subject: LodResource, predicate: LodResource, object: LodTerm) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    pub fn subject(&self) -> &LodResource {
        &self.subject
    }

    pub fn predicate(&self) -> &LodResource {
        &self.predicate
    }

    pub fn object(&self) -> &LodTerm {
        &self.object
    }

    /// De-duplication key: SHA-256 (hex) of the canonical string form.
    ///
    /// Two statements share a key iff subject, predicate, object value and
    /// object language/datatype are all equal.
    pub fn key(&self) -> String {
        format!("{:x}", Sha256::digest(self.to_string().as_bytes()))
    }
}

/// Canonical form, e.g.
/// `<http://res/Frank> <http://www.w3.org/2000/01/rdf-schema#label> "Frank"@en-gb`.
///
/// Literal values are JSON-escaped so distinct values never render the same.
impl fmt::Display for LodStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> ", self.subject, self.predicate)?;

        match &self.object {
            LodTerm::Resource(r) => write!(f, "<{}>", r),
            LodTerm::Literal(l) => {
                let quoted = serde_json::Value::String(l.value().to_string());
                match l.tag() {
                    LiteralTag::None => write!(f, "{}", quoted),
                    LiteralTag::Language(lang) => write!(f, "{}@{}", quoted, lang),
                    LiteralTag::Datatype(dt) => write!(f, "{}^^<{}>", quoted, dt),
                }
            }
        }
    }
}
