//! Search processing orchestration
//!
//! Ties the compiler to the engine-client collaborator: compile the request,
//! dispatch the document, transform the raw result. The processor holds no
//! mutable state; with a `Send + Sync` client it is safe to share across
//! tasks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::client::SearchClient;
use crate::error::Result;
use crate::query::{compile_count, compile_search};
use crate::registry::FieldRegistry;
use crate::request::SearchRequest;
use crate::transform::{facet_counts, FacetCount};

/// Processed search response: hits unchanged, aggregations flattened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching documents, engine order
    pub results: Vec<Value>,

    /// Facet counts; empty when no facets were requested
    pub facets: Vec<FacetCount>,
}

/// Compiles requests and dispatches them through a [`SearchClient`]
pub struct SearchProcessor<C, R> {
    client: C,
    registry: R,
}

impl<C, R> SearchProcessor<C, R>
where
    C: SearchClient,
    R: FieldRegistry,
{
    pub fn new(client: C, registry: R) -> Self {
        Self { client, registry }
    }

    /// The engine client this processor dispatches through
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Compile and execute a full search
    pub async fn process_search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let compiled = compile_search(request, &self.registry)?;
        let document = compiled.to_document();
        debug!(query = %document, "dispatching search query");

        let raw = self.client.execute(&document).await?;

        let facets = match &raw.aggregations {
            Some(aggregations) if !request.facets.is_empty() => {
                facet_counts(aggregations, &request.facets)
            }
            _ => Vec::new(),
        };

        Ok(SearchResponse {
            results: raw.hits,
            facets,
        })
    }

    /// Compile and execute a count-only search
    pub async fn process_count(&self, request: &SearchRequest) -> Result<u64> {
        let compiled = compile_count(request, &self.registry)?;
        let document = compiled.to_document();
        debug!(query = %document, "dispatching count query");

        self.client.count(&document).await
    }
}
