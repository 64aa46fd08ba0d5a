//! LOD index and query engine
//!
//! [`Lod`] accumulates statements from fetched and loaded documents into
//! per-subject [`LodInstance`]s. Instances are queried with comma-separated
//! predicate lists; results are filtered and ordered by the context's
//! language preferences.

mod context;
mod instance;
mod query;

pub use context::Lod;
pub use instance::{FilteredLodInstance, LodInstance};
pub use query::{
    filter_statements, language_allowed, language_rank, PredicateQuery, OWL_SAME_AS, RDF_TYPE,
};
