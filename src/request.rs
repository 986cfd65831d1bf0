//! Search request model
//!
//! A [`SearchRequest`] is structure-agnostic: callers describe what they want
//! as field/operation/value conditions plus a boolean combinator, optional
//! facets, an optional sort mapping and a result limit. The compiler in
//! [`crate::query`] turns this into an engine query document.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::{Result, SearchError};

/// Field name denoting "all full-text-searchable fields"
pub const ALL_FIELDS: &str = "*";

/// The closed set of condition operations
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchOperation {
    Equal,
    NotEqual,
    StartsWith,
    EndsWith,
    Like,
    Contains,
    NotLike,
    Exists,
    NotExists,
    GreaterThan,
    GreaterThanEquals,
    LessThan,
    LessThanEquals,
}

impl SearchOperation {
    /// Parse an operation token, failing fast on anything outside the set
    pub fn parse(token: &str) -> Result<Self> {
        Self::from_str(token).map_err(|_| SearchError::InvalidOperation(token.to_string()))
    }
}

/// Top-level boolean operator joining a request's conditions
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, Default,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
    #[default]
    And,
    Or,
}

/// Sort direction
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a direction token, failing fast on anything outside the set
    pub fn parse(token: &str) -> Result<Self> {
        Self::from_str(token).map_err(|_| SearchError::InvalidSortDirection(token.to_string()))
    }
}

/// One field/operation/values condition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyCondition {
    /// Field the condition applies to; `*` expands to all searchable fields
    pub field: String,

    /// Condition operation
    pub operation: SearchOperation,

    /// Condition values; more than one triggers OR-expansion
    pub values: Vec<Value>,
}

impl PropertyCondition {
    /// Create a condition with a single value
    pub fn new(field: impl Into<String>, operation: SearchOperation, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operation,
            values: vec![value.into()],
        }
    }

    /// Create a condition with multiple values (OR-expanded)
    pub fn with_values(
        field: impl Into<String>,
        operation: SearchOperation,
        values: Vec<Value>,
    ) -> Self {
        Self {
            field: field.into(),
            operation,
            values,
        }
    }
}

/// A requested facet: a field plus optional nested child facets
///
/// The aggregation tree is at most two levels deep; children cannot carry
/// children of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetSpec {
    /// Field to bucket on
    pub field: String,

    /// Child facets nested under this one
    #[serde(default)]
    pub children: Vec<String>,
}

impl FacetSpec {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<impl Into<String>>) -> Self {
        self.children = children.into_iter().map(|c| c.into()).collect();
        self
    }
}

/// Structure-agnostic search request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Conditions, in caller order
    #[serde(default)]
    pub properties: Vec<PropertyCondition>,

    /// How Positive and Arithmetic conditions combine; Negative conditions
    /// are always AND-excluded
    #[serde(default)]
    pub combinator: Combinator,

    /// Requested facets
    #[serde(default)]
    pub facets: Vec<FacetSpec>,

    /// Sort mapping; insertion order is sort priority
    #[serde(default)]
    pub sort_by: Vec<(String, SortDirection)>,

    /// Result-size limit; the registry default applies when absent
    pub limit: Option<usize>,
}

impl SearchRequest {
    /// Create an empty request (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition
    pub fn with_property(mut self, condition: PropertyCondition) -> Self {
        self.properties.push(condition);
        self
    }

    /// Set the combinator
    pub fn with_combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }

    /// Add a facet
    pub fn with_facet(mut self, facet: FacetSpec) -> Self {
        self.facets.push(facet);
        self
    }

    /// Append a sort field
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by.push((field.into(), direction));
        self
    }

    /// Set the result limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_parsing() {
        assert_eq!(
            SearchOperation::parse("GREATER_THAN_EQUALS").unwrap(),
            SearchOperation::GreaterThanEquals
        );
        assert_eq!(
            SearchOperation::parse("NOT_LIKE").unwrap(),
            SearchOperation::NotLike
        );

        let err = SearchOperation::parse("FUZZY").unwrap_err();
        assert!(matches!(err, SearchError::InvalidOperation(token) if token == "FUZZY"));
    }

    #[test]
    fn test_operation_display_round_trip() {
        let op = SearchOperation::StartsWith;
        assert_eq!(op.to_string(), "STARTS_WITH");
        assert_eq!(SearchOperation::parse(&op.to_string()).unwrap(), op);
    }

    #[test]
    fn test_sort_direction_parsing() {
        assert_eq!(SortDirection::parse("asc").unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse("desc").unwrap(), SortDirection::Desc);

        let err = SortDirection::parse("sideways").unwrap_err();
        assert!(matches!(err, SearchError::InvalidSortDirection(_)));
    }

    #[test]
    fn test_request_builder() {
        let request = SearchRequest::new()
            .with_property(PropertyCondition::new(
                "status",
                SearchOperation::Equal,
                "Live",
            ))
            .with_combinator(Combinator::Or)
            .with_facet(FacetSpec::new("board").with_children(vec!["medium"]))
            .with_sort("name", SortDirection::Desc)
            .with_limit(50);

        assert_eq!(request.properties.len(), 1);
        assert_eq!(request.combinator, Combinator::Or);
        assert_eq!(request.facets[0].children, vec!["medium"]);
        assert_eq!(request.sort_by[0].0, "name");
        assert_eq!(request.limit, Some(50));
    }

    #[test]
    fn test_request_deserialization() {
        let request: SearchRequest = serde_json::from_str(
            r#"{
                "properties": [
                    {"field": "subject", "operation": "EQUAL", "values": ["Science"]}
                ],
                "combinator": "OR",
                "facets": [{"field": "board"}],
                "limit": 20
            }"#,
        )
        .unwrap();

        assert_eq!(request.properties[0].operation, SearchOperation::Equal);
        assert_eq!(request.combinator, Combinator::Or);
        assert!(request.facets[0].children.is_empty());
        assert!(request.sort_by.is_empty());
    }
}
