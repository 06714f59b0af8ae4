//! # Kontos
//!
//! A client-side query shaping and response reduction library for
//! entity-disambiguated search against Elasticsearch-style backends.
//!
//! ## Features
//!
//! - Fuzzy multi-field query construction with nested entity aggregation
//! - Typed traversal of nested aggregation responses
//! - Flat, score-ordered entity tables with summary statistics
//! - Thin async HTTP executor, mention-store access, CSV export
//!
//! The two core operations are pure: [`query::QueryBuilder`] turns a
//! free-text query into a [`query::SearchRequest`], and [`response::reduce`]
//! flattens the backend's nested aggregation response into a
//! [`table::ResultTable`] sorted by descending relevance. Both take the same
//! [`query::AggregationPath`], which keeps request nesting and response
//! traversal in lockstep.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod query;
pub mod response;
pub mod store;
pub mod table;

pub mod prelude {
    //! Convenience re-exports of the core types.

    pub use crate::error::{KontosError, Result};
    pub use crate::query::{AggregationPath, Fuzziness, QueryBuilder, SearchRequest, SourceFilter};
    pub use crate::response::{Reduction, reduce};
    pub use crate::table::{ResultRow, ResultTable};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
