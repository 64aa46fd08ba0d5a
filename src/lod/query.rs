//! Predicate filtering and language ranking over an instance's statements

use crate::rdf::{LodStatement, LodTerm, PrefixMap};

/// `rdf:type`
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// `owl:sameAs`
pub const OWL_SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";

/// A comma-separated list of predicates, each prefix-expanded.
///
/// A statement matches if its predicate equals any of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateQuery {
    predicates: Vec<String>,
}

impl PredicateQuery {
    /// Parse e.g. `"rdfs:label, schema:name"`
    pub fn parse(query: &str, prefixes: &PrefixMap) -> Self {
        let predicates = query
            .split(',')
            .map(|predicate| prefixes.expand(predicate.trim()))
            .collect();
        Self { predicates }
    }

    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    pub fn matches(&self, predicate: &str) -> bool {
        self.predicates.iter().any(|p| p == predicate)
    }
}

/// Language-tagged literals pass only if their tag is in `languages`;
/// untagged literals and resources always pass.
pub fn language_allowed(term: &LodTerm, languages: &[String]) -> bool {
    match term.language() {
        Some(lang) => languages.iter().any(|l| l.eq_ignore_ascii_case(lang)),
        None => true,
    }
}

/// Index of the term's language in `languages`; terms without a listed
/// language rank last (`languages.len()`).
pub fn language_rank(term: &LodTerm, languages: &[String]) -> usize {
    term.language()
        .and_then(|lang| languages.iter().position(|l| l.eq_ignore_ascii_case(lang)))
        .unwrap_or(languages.len())
}

/// Select statements matching `query` and the language filter, ordered by
/// language rank. The sort is stable, so equal ranks keep model order.
pub fn filter_statements<'a>(
    model: &'a [LodStatement],
    query: &PredicateQuery,
    languages: &[String],
) -> Vec<&'a LodStatement> {
    let mut selected: Vec<&LodStatement> = model
        .iter()
        .filter(|s| query.matches(s.predicate().as_str()))
        .filter(|s| language_allowed(s.object(), languages))
        .collect();

    selected.sort_by_key(|s| language_rank(s.object(), languages));
    selected
}
