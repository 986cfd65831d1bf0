//! Query compilation entry points
//!
//! [`compile_search`] and [`compile_count`] turn a [`SearchRequest`] into a
//! [`CompiledQuery`]: the assembled filter tree, aggregation tree, sort list
//! and size hint. Serialization to the engine document happens once, in
//! [`CompiledQuery::to_document`]. Compilation is pure; a compiled query is
//! owned by the call that produced it and carries no cross-request state.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::query::aggs::{plan_aggregations, AggTree};
use crate::query::classify::{classify, ClassifiedCondition};
use crate::query::filter::{build_filter, FilterTree};
use crate::query::sort::{resolve_sort, sort_to_value, SortList};
use crate::registry::FieldRegistry;
use crate::request::SearchRequest;

/// Result size applied when a request carries no limit
pub const DEFAULT_RESULT_LIMIT: usize = 100;

/// The finished structured query document
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    /// Filter tree; absent for an unfiltered query
    pub filter: Option<FilterTree>,

    /// Aggregation tree; absent when no facets were requested
    pub aggregations: Option<AggTree>,

    /// Resolved sort; absent in count mode
    pub sort: Option<SortList>,

    /// Result-size hint; absent in count mode
    pub size: Option<usize>,
}

impl CompiledQuery {
    /// Serialize to the engine query document
    pub fn to_document(&self) -> Value {
        let mut document = Map::new();
        if let Some(filter) = &self.filter {
            document.insert("query".to_string(), filter.to_value());
        }
        if let Some(aggregations) = &self.aggregations {
            document.insert("aggs".to_string(), aggregations.to_value());
        }
        if let Some(sort) = &self.sort {
            document.insert("sort".to_string(), sort_to_value(sort));
        }
        if let Some(size) = self.size {
            document.insert("size".to_string(), Value::from(size));
        }
        Value::Object(document)
    }
}

fn classify_all(
    request: &SearchRequest,
    registry: &dyn FieldRegistry,
) -> Result<Vec<ClassifiedCondition>> {
    request
        .properties
        .iter()
        .map(|condition| classify(condition, registry))
        .collect()
}

/// Compile a request in query mode: filter, facets, sort and size
pub fn compile_search(
    request: &SearchRequest,
    registry: &dyn FieldRegistry,
) -> Result<CompiledQuery> {
    let conditions = classify_all(request, registry)?;

    Ok(CompiledQuery {
        filter: build_filter(&conditions, request.combinator),
        aggregations: plan_aggregations(&request.facets, registry),
        sort: resolve_sort(&request.sort_by, true, registry),
        size: Some(request.limit.unwrap_or(DEFAULT_RESULT_LIMIT)),
    })
}

/// Compile a request in count mode: the same filter, nothing else
pub fn compile_count(
    request: &SearchRequest,
    registry: &dyn FieldRegistry,
) -> Result<CompiledQuery> {
    let conditions = classify_all(request, registry)?;

    Ok(CompiledQuery {
        filter: build_filter(&conditions, request.combinator),
        aggregations: None,
        sort: None,
        size: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StaticFieldRegistry;
    use crate::request::{Combinator, FacetSpec, PropertyCondition, SearchOperation, SortDirection};
    use serde_json::json;

    #[test]
    fn test_empty_request_compiles_to_default_sort_only() {
        let request = SearchRequest::new();
        let compiled = compile_search(&request, &StaticFieldRegistry::default()).unwrap();

        assert!(compiled.filter.is_none());
        assert!(compiled.aggregations.is_none());

        let document = compiled.to_document();
        assert_eq!(
            document,
            json!({
                "sort": [{ "name.raw": "asc" }],
                "size": DEFAULT_RESULT_LIMIT
            })
        );
    }

    #[test]
    fn test_count_mode_drops_sort_aggs_and_size() {
        let request = SearchRequest::new()
            .with_property(PropertyCondition::new(
                "status",
                SearchOperation::Equal,
                "Live",
            ))
            .with_facet(FacetSpec::new("board"))
            .with_sort("name", SortDirection::Desc)
            .with_limit(10);

        let compiled = compile_count(&request, &StaticFieldRegistry::default()).unwrap();
        assert!(compiled.filter.is_some());
        assert!(compiled.aggregations.is_none());
        assert!(compiled.sort.is_none());
        assert!(compiled.size.is_none());

        let document = compiled.to_document();
        let keys: Vec<_> = document.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["query"]);
    }

    #[test]
    fn test_explicit_limit_wins_over_default() {
        let request = SearchRequest::new().with_limit(7);
        let compiled = compile_search(&request, &StaticFieldRegistry::default()).unwrap();
        assert_eq!(compiled.size, Some(7));
    }

    #[test]
    fn test_classification_failure_aborts_compilation() {
        let request = SearchRequest::new()
            .with_property(PropertyCondition::new(
                "status",
                SearchOperation::Equal,
                "Live",
            ))
            .with_property(PropertyCondition::with_values(
                "grade",
                SearchOperation::Equal,
                vec![],
            ));

        let err = compile_search(&request, &StaticFieldRegistry::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::SearchError::EmptyValueList(field) if field == "grade"
        ));
    }

    #[test]
    fn test_combinator_reaches_the_filter() {
        let request = SearchRequest::new()
            .with_combinator(Combinator::Or)
            .with_property(PropertyCondition::new(
                "status",
                SearchOperation::Equal,
                "Live",
            ));

        let compiled = compile_search(&request, &StaticFieldRegistry::default()).unwrap();
        let tree = compiled.filter.unwrap();
        assert!(tree.root.must.is_empty());
        assert_eq!(tree.root.should.len(), 1);
    }
}
