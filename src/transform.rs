//! Aggregation-result transformation
//!
//! Maps the engine's raw terms-aggregation buckets back into flat
//! [`FacetCount`] records, walking the same facet list the aggregation tree
//! was planned from. Hits need no transformation and pass through upstream.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::request::FacetSpec;

/// One facet bucket: field, bucket value and document count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetCount {
    /// Facet field the bucket belongs to
    pub facet: String,

    /// Bucket key as reported by the engine
    pub value: Value,

    /// Documents in the bucket
    pub count: u64,
}

fn buckets(aggregation: &Value) -> &[Value] {
    aggregation
        .get("buckets")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn bucket_count(bucket: &Value) -> u64 {
    bucket
        .get("doc_count")
        .and_then(Value::as_u64)
        .unwrap_or(0)
}

/// Flatten raw aggregations into facet-count records
///
/// Records come out in facet-request order, then engine bucket order; each
/// parent bucket is followed by its child buckets, keyed by the child facet
/// name. Facets the engine reported nothing for contribute no records.
pub fn facet_counts(aggregations: &Map<String, Value>, facets: &[FacetSpec]) -> Vec<FacetCount> {
    let mut counts = Vec::new();

    for facet in facets {
        let Some(aggregation) = aggregations.get(&facet.field) else {
            continue;
        };

        for bucket in buckets(aggregation) {
            let Some(key) = bucket.get("key") else {
                continue;
            };
            counts.push(FacetCount {
                facet: facet.field.clone(),
                value: key.clone(),
                count: bucket_count(bucket),
            });

            for child in &facet.children {
                let Some(child_aggregation) = bucket.get(child) else {
                    continue;
                };
                for child_bucket in buckets(child_aggregation) {
                    let Some(child_key) = child_bucket.get("key") else {
                        continue;
                    };
                    counts.push(FacetCount {
                        facet: child.clone(),
                        value: child_key.clone(),
                        count: bucket_count(child_bucket),
                    });
                }
            }
        }
    }

    counts
}
