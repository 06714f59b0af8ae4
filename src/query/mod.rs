//! Query construction: field selection, fuzziness, request building.

pub mod builder;
pub mod fields;
pub mod request;

pub use self::builder::{DEFAULT_ENTITY_LIMIT, DEFAULT_TIMEOUT, QueryBuilder};
pub use self::fields::{AggregationPath, SourceFilter};
pub use self::request::{Fuzziness, MAX_FUZZINESS, SearchRequest};
