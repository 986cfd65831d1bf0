//! Search-engine client boundary
//!
//! The compiler emits a query document; an external collaborator owns the
//! transport. Implementations live outside this crate (or in tests as
//! stubs); every failure they report surfaces as
//! [`crate::error::SearchError::ExecutionFailed`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Raw engine response: hits plus aggregation buckets as returned
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSearchResult {
    /// Matching documents, engine order
    #[serde(default)]
    pub hits: Vec<Value>,

    /// Aggregation results keyed by aggregation name
    #[serde(default)]
    pub aggregations: Option<Map<String, Value>>,
}

/// External search-engine collaborator
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Execute a query document, returning hits and aggregations
    async fn execute(&self, document: &Value) -> Result<RawSearchResult>;

    /// Execute a count-only request for a query document
    async fn count(&self, document: &Value) -> Result<u64>;
}
