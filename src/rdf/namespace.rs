//! RDF namespace and prefix management
//!
//! A process-wide table of common vocabulary prefixes, shadowed per
//! [`PrefixMap`] by explicit overrides.

use indexmap::IndexMap;

/// Commonly-used RDF prefixes
pub const COMMON_PREFIXES: &[(&str, &str)] = &[
    ("bibo", "http://purl.org/ontology/bibo/"),
    ("cc", "http://creativecommons.org/ns#"),
    ("crm", "http://www.cidoc-crm.org/cidoc-crm/"),
    ("dcmitype", "http://purl.org/dc/dcmitype/"),
    ("dc", "http://purl.org/dc/terms/"),
    ("dct", "http://purl.org/dc/terms/"),
    ("dcterms", "http://purl.org/dc/terms/"),
    ("exif", "http://www.w3.org/2003/12/exif/ns#"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("formats", "http://www.w3.org/ns/formats/"),
    ("frbr", "http://purl.org/vocab/frbr/core#"),
    ("geo", "http://www.w3.org/2003/01/geo/wgs84_pos#"),
    ("lio", "http://purl.org/net/lio#"),
    ("mrss", "http://search.yahoo.com/mrss/"),
    ("oa", "http://www.w3.org/ns/oa#"),
    ("odrl", "http://www.w3.org/ns/odrl/2/"),
    ("olo", "http://purl.org/ontology/olo/core#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("po", "http://purl.org/ontology/po/"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("schema", "http://schema.org/"),
    ("sioc", "http://rdfs.org/sioc/services#"),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
    ("vcard", "http://www.w3.org/vcard-rdf/3.0#"),
    ("void", "http://rdfs.org/ns/void#"),
    ("wdrs", "http://www.w3.org/2007/05/powder-s#"),
    ("xhtml", "http://www.w3.org/1999/xhtml/vocab#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

/// Look up a prefix in the built-in table
pub fn common_prefix(prefix: &str) -> Option<&'static str> {
    COMMON_PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, iri)| *iri)
}

/// Prefix → namespace IRI mapping layered over [`COMMON_PREFIXES`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMap {
    /// Explicit overrides; these shadow the common table
    overrides: IndexMap<String, String>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a prefix
    pub fn set(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.overrides.insert(prefix.into(), iri.into());
    }

    /// Get the namespace IRI for a prefix
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.overrides
            .get(prefix)
            .map(String::as_str)
            .or_else(|| common_prefix(prefix))
    }

    /// Expand `prefix:local` into a full IRI.
    ///
    /// Terms that already look absolute (`http...`) and terms whose prefix is
    /// unknown are returned unchanged.
    pub fn expand(&self, term: &str) -> String {
        if term.starts_with("http") {
            return term.to_string();
        }

        match term.split_once(':') {
            Some((prefix, local)) => match self.get(prefix) {
                Some(iri) => format!("{}{}", iri, local),
                None => term.to_string(),
            },
            None => term.to_string(),
        }
    }

    /// All effective prefixes: overrides first, then common prefixes not shadowed
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let overrides = self
            .overrides
            .iter()
            .map(|(p, iri)| (p.as_str(), iri.as_str()));
        let common = COMMON_PREFIXES
            .iter()
            .filter(|(p, _)| !self.overrides.contains_key(*p))
            .map(|(p, iri)| (*p, *iri));
        overrides.chain(common)
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for PrefixMap {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (prefix, iri) in iter {
            self.set(prefix, iri);
        }
    }
}
