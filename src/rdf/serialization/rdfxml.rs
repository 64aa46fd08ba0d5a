//! RDF/XML format implementation

use super::{blank_scope, convert_triple, parse_base_iri, ParseError, ParseResult};
use crate::rdf::LodStatement;
use rio_api::parser::TriplesParser;
use rio_xml::RdfXmlParser;

/// RDF/XML parser
pub struct RdfXmlParserWrapper;

impl RdfXmlParserWrapper {
    /// Parse an RDF/XML document into statements
    pub fn parse(input: &str, base_iri: Option<&str>) -> ParseResult<Vec<LodStatement>> {
        let mut parser = RdfXmlParser::new(input.as_bytes(), parse_base_iri(base_iri));

        let scope = blank_scope(input, base_iri);
        let mut statements = Vec::new();
        parser.parse_all(&mut |t| -> Result<(), ParseError> {
            statements.push(convert_triple(t, &scope)?);
            Ok(())
        })?;

        Ok(statements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">
  <rdf:Description rdf:about="http://example.org/thing">
    <rdfs:label xml:lang="en-gb">Thing</rdfs:label>
    <owl:sameAs rdf:resource="http://other.org/thing"/>
  </rdf:Description>
</rdf:RDF>"#;

    #[test]
    fn test_parse_rdfxml() {
        let statements = RdfXmlParserWrapper::parse(DOC, None).unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].subject().as_str(), "http://example.org/thing");
        assert_eq!(statements[0].object().value(), "Thing");
        assert_eq!(statements[0].object().language(), Some("en-gb"));
        assert_eq!(statements[1].object().value(), "http://other.org/thing");
        assert!(statements[1].object().is_resource());
    }

    #[test]
    fn test_malformed_rdfxml() {
        let result = RdfXmlParserWrapper::parse("<rdf:RDF><unclosed>", None);
        assert!(result.is_err());
    }
}
