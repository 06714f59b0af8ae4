//! Response handling: typed aggregation tree and table reduction.

pub mod reducer;
pub mod tree;

pub use self::reducer::{Reduction, reduce};
pub use self::tree::{AggregationBucket, AggregationLevel, AggregationNode, TopHit};
