//! Turtle format implementation

use super::{blank_scope, convert_triple, parse_base_iri, ParseError, ParseResult, SerializeError, SerializeResult};
use crate::rdf::{LodStatement, LodTerm, PrefixMap};
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_turtle::{TurtleFormatter, TurtleParser};
use std::fmt::Write as _;

/// Turtle parser
pub struct TurtleParserWrapper;

impl TurtleParserWrapper {
    /// Parse a Turtle string into statements
    pub fn parse(input: &str, base_iri: Option<&str>) -> ParseResult<Vec<LodStatement>> {
        let mut parser = TurtleParser::new(input.as_bytes(), parse_base_iri(base_iri));

        let scope = blank_scope(input, base_iri);
        let mut statements = Vec::new();
        parser.parse_all(&mut |t| -> Result<(), ParseError> {
            statements.push(convert_triple(t, &scope)?);
            Ok(())
        })?;

        Ok(statements)
    }
}

/// Turtle serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Serialize statements to Turtle.
    ///
    /// Emits an `@prefix` line for every prefix whose namespace occurs in the
    /// output, followed by one triple per line.
    pub fn serialize<'a>(
        statements: impl IntoIterator<Item = &'a LodStatement>,
        prefixes: &PrefixMap,
    ) -> SerializeResult<String> {
        let statements: Vec<&LodStatement> = statements.into_iter().collect();

        let mut body = Vec::new();
        let mut formatter = TurtleFormatter::new(&mut body);

        for statement in &statements {
            let subject = if let Some(id) = blank_id(statement.subject().as_str()) {
                rio_api::model::Subject::BlankNode(rio_api::model::BlankNode { id })
            } else {
                rio_api::model::Subject::NamedNode(rio_api::model::NamedNode {
                    iri: statement.subject().as_str(),
                })
            };

            let predicate = rio_api::model::NamedNode {
                iri: statement.predicate().as_str(),
            };

            let object = match statement.object() {
                LodTerm::Resource(r) => match blank_id(r.as_str()) {
                    Some(id) => rio_api::model::Term::BlankNode(rio_api::model::BlankNode { id }),
                    None => rio_api::model::Term::NamedNode(rio_api::model::NamedNode { iri: r.as_str() }),
                },
                LodTerm::Literal(l) => {
                    let literal = if let Some(language) = l.language() {
                        rio_api::model::Literal::LanguageTaggedString { value: l.value(), language }
                    } else if let Some(datatype) = l.datatype() {
                        rio_api::model::Literal::Typed {
                            value: l.value(),
                            datatype: rio_api::model::NamedNode { iri: datatype },
                        }
                    } else {
                        rio_api::model::Literal::Simple { value: l.value() }
                    };
                    rio_api::model::Term::Literal(literal)
                }
            };

            formatter
                .format(&rio_api::model::Triple { subject, predicate, object })
                .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        }

        formatter
            .finish()
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;

        let body = String::from_utf8(body).map_err(|e| SerializeError::Serialize(e.to_string()))?;

        let mut output = String::new();
        for (prefix, iri) in prefixes.iter() {
            if statements.iter().any(|s| uses_namespace(s, iri)) {
                writeln!(output, "@prefix {}: <{}> .", prefix, iri)
                    .map_err(|e| SerializeError::Serialize(e.to_string()))?;
            }
        }
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&body);

        Ok(output)
    }
}

fn blank_id(value: &str) -> Option<&str> {
    value.strip_prefix("_:")
}

fn uses_namespace(statement: &LodStatement, namespace: &str) -> bool {
    let object_iri = match statement.object() {
        LodTerm::Resource(r) => Some(r.as_str()),
        LodTerm::Literal(l) => l.datatype(),
    };

    statement.subject().as_str().starts_with(namespace)
        || statement.predicate().as_str().starts_with(namespace)
        || object_iri.is_some_and(|iri| iri.starts_with(namespace))
}
