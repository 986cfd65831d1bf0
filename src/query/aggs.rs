//! Facet/aggregation planning
//!
//! Each requested facet becomes a terms aggregation keyed by the facet
//! field's raw form, sized by the registry's default bucket count. Child
//! facets nest one level deep under their parent. The per-request hit limit
//! never bounds bucket counts; the two knobs are independent.

use serde_json::{json, Map, Value};

use crate::registry::{raw_field, FieldRegistry};
use crate::request::FacetSpec;

/// One terms aggregation, possibly with nested children
#[derive(Debug, Clone, PartialEq)]
pub struct AggNode {
    /// Logical field name (suffix resolution happens at serialization)
    pub field: String,

    /// Bucket count
    pub size: usize,

    /// Nested child aggregations, one level deep
    pub children: Vec<AggNode>,
}

/// The planned aggregation tree for one request
#[derive(Debug, Clone, PartialEq)]
pub struct AggTree {
    pub aggs: Vec<AggNode>,
}

impl AggNode {
    fn to_value(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            "terms".to_string(),
            json!({ "field": raw_field(&self.field), "size": self.size }),
        );
        if !self.children.is_empty() {
            let mut children = Map::new();
            for child in &self.children {
                children.insert(child.field.clone(), child.to_value());
            }
            body.insert("aggs".to_string(), Value::Object(children));
        }
        Value::Object(body)
    }
}

impl AggTree {
    /// Serialize the `aggs` body keyed by facet field
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for node in &self.aggs {
            map.insert(node.field.clone(), node.to_value());
        }
        Value::Object(map)
    }
}

/// Plan the aggregation tree for the requested facets
///
/// Returns `None` when no facets were requested, so the compiled document
/// carries no `aggs` key at all.
pub fn plan_aggregations(facets: &[FacetSpec], registry: &dyn FieldRegistry) -> Option<AggTree> {
    if facets.is_empty() {
        return None;
    }

    let size = registry.default_aggregation_size();
    let aggs = facets
        .iter()
        .map(|facet| AggNode {
            field: facet.field.clone(),
            size,
            children: facet
                .children
                .iter()
                .map(|child| AggNode {
                    field: child.clone(),
                    size,
                    children: Vec::new(),
                })
                .collect(),
        })
        .collect();

    Some(AggTree { aggs })
}
