//! The search query compiler
//!
//! Converts a structure-agnostic [`crate::request::SearchRequest`] into an
//! engine query document in four steps:
//!
//! 1. **Classify** each condition into Positive/Negative/Arithmetic and an
//!    engine-agnostic shape ([`classify`]).
//! 2. **Assemble** the filter tree, honoring the request combinator for
//!    positive and arithmetic conditions and always AND-excluding negatives
//!    ([`filter`]).
//! 3. **Plan** the aggregation tree for requested facets ([`aggs`]) and
//!    **resolve** the sort sequence ([`sort`]).
//! 4. **Serialize** the whole tree in one isolated step
//!    ([`compile::CompiledQuery::to_document`]).
//!
//! Every step is a pure function: no shared state, safe to call from any
//! number of tasks concurrently.

pub mod aggs;
pub mod classify;
pub mod compile;
pub mod filter;
pub mod sort;

pub use aggs::{plan_aggregations, AggNode, AggTree};
pub use classify::{classify, Bucket, ClassifiedCondition, ConditionShape, SimpleCondition};
pub use compile::{compile_count, compile_search, CompiledQuery, DEFAULT_RESULT_LIMIT};
pub use filter::{build_filter, BoolNode, FilterTree, QueryNode};
pub use sort::{resolve_sort, SortEntry, SortList};
