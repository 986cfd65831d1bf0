//! Search query compiler for a metadata platform's composite search index
//!
//! This crate converts generic, structure-agnostic search requests into
//! term-based search-engine query documents, and maps raw aggregation
//! results back into facet counts:
//!
//! - **Condition classification**: field/operation/value triples become
//!   Positive, Negative or Arithmetic conditions with engine-agnostic shapes
//! - **Boolean assembly**: positive conditions honor the request's AND/OR
//!   combinator; negative conditions are always AND-excluded
//! - **Scripted comparisons**: numeric thresholds render as per-document
//!   script expressions with reproducible concatenation
//! - **Faceted search**: facet requests become nested terms-aggregation
//!   trees, and raw buckets flatten back into facet counts
//! - **Suffix conventions**: raw/keyword vs. analyzed vs. date field forms
//!   resolve correctly for filtering, aggregation and sorting
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              SearchProcessor                     │
//! ├─────────────────────────────────────────────────┤
//! │  - process_search()    - process_count()        │
//! └─────────────────────────────────────────────────┘
//!            │                          ▲
//!            ▼                          │
//! ┌─────────────────────┐   ┌──────────────────────┐
//! │   Query Compiler     │   │  Result Transformer  │
//! ├─────────────────────┤   ├──────────────────────┤
//! │  classify → filter   │   │  buckets → facet     │
//! │  aggs · sort · size  │   │  counts              │
//! └─────────────────────┘   └──────────────────────┘
//!            │                          ▲
//!            ▼                          │
//! ┌─────────────────────────────────────────────────┐
//! │        SearchClient (external collaborator)      │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The compiler itself is pure and synchronous; only the client boundary is
//! async. Transport, index mappings and relevance tuning all belong to the
//! collaborator behind [`SearchClient`].
//!
//! # Example
//!
//! ```
//! use composite_search::{
//!     compile_search, PropertyCondition, SearchOperation, SearchRequest,
//!     StaticFieldRegistry,
//! };
//!
//! # fn main() -> composite_search::Result<()> {
//! let request = SearchRequest::new()
//!     .with_property(PropertyCondition::new(
//!         "status",
//!         SearchOperation::Equal,
//!         "Live",
//!     ))
//!     .with_limit(20);
//!
//! let registry = StaticFieldRegistry::default();
//! let compiled = compile_search(&request, &registry)?;
//! let document = compiled.to_document();
//! assert!(document.get("query").is_some());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod processor;
pub mod query;
pub mod registry;
pub mod request;
pub mod transform;

pub use client::{RawSearchResult, SearchClient};
pub use error::{Result, SearchError};
pub use processor::{SearchProcessor, SearchResponse};
pub use query::{compile_count, compile_search, CompiledQuery};
pub use registry::{FieldRegistry, StaticFieldRegistry, StaticFieldRegistryBuilder};
pub use request::{
    Combinator, FacetSpec, PropertyCondition, SearchOperation, SearchRequest, SortDirection,
    ALL_FIELDS,
};
pub use transform::{facet_counts, FacetCount};
