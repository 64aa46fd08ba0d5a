//! Per-subject statement sets and filtered views over them

use super::query::{filter_statements, PredicateQuery};
use crate::rdf::{LodStatement, LodTerm, PrefixMap};
use rustc_hash::FxHashSet;
use std::fmt;

/// Accumulated statements about one subject URI.
///
/// Statements keep insertion order; adding a statement whose key is already
/// present is a no-op.
#[derive(Debug, Clone, Default)]
pub struct LodInstance {
    uri: String,
    model: Vec<LodStatement>,
    keys: FxHashSet<String>,
}

impl LodInstance {
    /// Create an empty instance for `uri`
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            model: Vec::new(),
            keys: FxHashSet::default(),
        }
    }

    /// Create an instance pre-populated with `statements` (de-duplicated)
    pub fn with_statements(
        uri: impl Into<String>,
        statements: impl IntoIterator<Item = LodStatement>,
    ) -> Self {
        let mut instance = Self::new(uri);
        instance.merge(statements);
        instance
    }

    /// Subject URI
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Statements in insertion order
    pub fn model(&self) -> &[LodStatement] {
        &self.model
    }

    /// Add a statement unless an identical one is already present.
    /// Returns true if the statement was added.
    pub fn add(&mut self, statement: LodStatement) -> bool {
        if !self.keys.insert(statement.key()) {
            return false;
        }
        self.model.push(statement);
        true
    }

    /// Add many statements; returns how many were new
    pub fn merge(&mut self, statements: impl IntoIterator<Item = LodStatement>) -> usize {
        let mut added = 0;
        for statement in statements {
            if self.add(statement) {
                added += 1;
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LodStatement> {
        self.model.iter()
    }

    /// Run a predicate query against this instance with an explicit prefix
    /// map and language preference list.
    pub fn filter_with(
        &self,
        query: &str,
        prefixes: &PrefixMap,
        languages: &[String],
    ) -> FilteredLodInstance<'_> {
        let query = PredicateQuery::parse(query, prefixes);
        FilteredLodInstance {
            uri: &self.uri,
            model: filter_statements(&self.model, &query, languages),
        }
    }
}

impl<'a> IntoIterator for &'a LodInstance {
    type Item = &'a LodStatement;
    type IntoIter = std::slice::Iter<'a, LodStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.model.iter()
    }
}

/// An unfiltered instance renders as its subject URI
impl fmt::Display for LodInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Read-only result of a predicate query: a re-ordered subset of an
/// instance's statements, most preferred language first.
///
/// Iterating yields the statements' objects, and the string form is the
/// value of the first object (or `""` when nothing matched).
#[derive(Debug, Clone)]
pub struct FilteredLodInstance<'a> {
    uri: &'a str,
    model: Vec<&'a LodStatement>,
}

impl<'a> FilteredLodInstance<'a> {
    /// Subject URI of the source instance
    pub fn uri(&self) -> &'a str {
        self.uri
    }

    /// Matching statements, best first
    pub fn model(&self) -> &[&'a LodStatement] {
        &self.model
    }

    /// The best-ranked object, if any
    pub fn first(&self) -> Option<&'a LodTerm> {
        self.model.first().map(|s| s.object())
    }

    /// Objects of the matching statements, best first
    pub fn objects(&self) -> impl Iterator<Item = &'a LodTerm> + '_ {
        self.model.iter().map(|s| s.object())
    }

    pub fn len(&self) -> usize {
        self.model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }
}

fn object_of<'a>(statement: &&'a LodStatement) -> &'a LodTerm {
    statement.object()
}

impl<'b, 'a> IntoIterator for &'b FilteredLodInstance<'a> {
    type Item = &'a LodTerm;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'b, &'a LodStatement>,
        fn(&&'a LodStatement) -> &'a LodTerm,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.model.iter().map(object_of as fn(&&'a LodStatement) -> &'a LodTerm)
    }
}

impl fmt::Display for FilteredLodInstance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some(term) => f.write_str(term.value()),
            None => Ok(()),
        }
    }
}
