//! Filter-tree assembly
//!
//! Classified conditions become an in-memory boolean tree of [`QueryNode`]s.
//! Building the tree and serializing it are separate steps: the compiler is
//! tested against the tree shape, and [`FilterTree::to_value`] is the single
//! place the tree crosses into engine JSON.
//!
//! Arithmetic conditions are the one exception to structured assembly: the
//! engine evaluates them as a per-document script, so they render into a
//! single expression string. Fragments concatenate left to right with no
//! added parentheses and no spaces around the joiner
//! (`doc['age'].value >= 18&&doc['age'].value < 60`); OR-group fragments are
//! parenthesized and joined with `||` regardless of the outer combinator.

use serde_json::{json, Map, Value};

use crate::query::classify::{Bucket, ClassifiedCondition, ConditionShape, SimpleCondition};
use crate::registry::raw_field;
use crate::request::{Combinator, SearchOperation};

/// A node in the filter tree
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    /// Phrase match; `field` is already suffix-resolved
    MatchPhrase { field: String, value: Value },

    /// Prefix match on the raw field
    Prefix { field: String, value: String },

    /// Wildcard match on the raw field
    Wildcard { field: String, pattern: String },

    /// Field-presence check
    Exists { field: String },

    /// Scripted per-document expression
    Script { source: String },

    /// Nested boolean subtree
    Bool(BoolNode),
}

/// Boolean combination of nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolNode {
    pub must: Vec<QueryNode>,
    pub should: Vec<QueryNode>,
    pub must_not: Vec<QueryNode>,
}

impl BoolNode {
    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && self.must_not.is_empty()
    }
}

/// The assembled filter for one request
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTree {
    pub root: BoolNode,
}

fn keyed(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

impl QueryNode {
    /// Serialize this node to its engine JSON form
    pub fn to_value(&self) -> Value {
        match self {
            QueryNode::MatchPhrase { field, value } => {
                keyed("match_phrase", keyed(field, value.clone()))
            }
            QueryNode::Prefix { field, value } => keyed(
                "query",
                keyed("prefix", keyed(field, Value::String(value.clone()))),
            ),
            QueryNode::Wildcard { field, pattern } => keyed(
                "query",
                keyed("wildcard", keyed(field, Value::String(pattern.clone()))),
            ),
            QueryNode::Exists { field } => json!({ "exists": { "field": field } }),
            QueryNode::Script { source } => json!({ "script": { "script": source } }),
            QueryNode::Bool(bool_node) => keyed("bool", bool_node.to_value()),
        }
    }
}

impl BoolNode {
    /// Serialize the boolean body, omitting empty occurrence lists
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for (key, nodes) in [
            ("must", &self.must),
            ("should", &self.should),
            ("must_not", &self.must_not),
        ] {
            if !nodes.is_empty() {
                let rendered: Vec<Value> = nodes.iter().map(QueryNode::to_value).collect();
                map.insert(key.to_string(), Value::Array(rendered));
            }
        }
        Value::Object(map)
    }
}

impl FilterTree {
    /// Serialize the full filtered-query envelope
    pub fn to_value(&self) -> Value {
        json!({
            "filtered": {
                "query": {
                    "bool": self.root.to_value()
                }
            }
        })
    }
}

/// Render a scalar for script concatenation: strings bare, numbers plain
fn script_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// String form of a value used as a field name or match text
fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl SearchOperation {
    /// Script comparator for arithmetic operations
    fn comparator(&self) -> Option<&'static str> {
        match self {
            SearchOperation::GreaterThan => Some(">"),
            SearchOperation::GreaterThanEquals => Some(">="),
            SearchOperation::LessThan => Some("<"),
            SearchOperation::LessThanEquals => Some("<="),
            _ => None,
        }
    }
}

/// Render one leaf condition as a term-level node
fn term_node(leaf: &SimpleCondition) -> QueryNode {
    match leaf.operation {
        SearchOperation::Equal | SearchOperation::NotEqual => QueryNode::MatchPhrase {
            field: raw_field(&leaf.field),
            value: leaf.value.clone(),
        },
        SearchOperation::Like | SearchOperation::Contains | SearchOperation::NotLike => {
            QueryNode::MatchPhrase {
                field: leaf.field.clone(),
                value: leaf.value.clone(),
            }
        }
        SearchOperation::StartsWith => QueryNode::Prefix {
            field: raw_field(&leaf.field),
            value: text_value(&leaf.value),
        },
        SearchOperation::EndsWith => QueryNode::Wildcard {
            field: raw_field(&leaf.field),
            pattern: format!("*{}", text_value(&leaf.value)),
        },
        // The checked field travels in the condition value
        SearchOperation::Exists | SearchOperation::NotExists => QueryNode::Exists {
            field: text_value(&leaf.value),
        },
        SearchOperation::GreaterThan
        | SearchOperation::GreaterThanEquals
        | SearchOperation::LessThan
        | SearchOperation::LessThanEquals => QueryNode::Script {
            source: script_fragment(leaf),
        },
    }
}

/// One `doc['field'].value <op> <value>` fragment
fn script_fragment(leaf: &SimpleCondition) -> String {
    let comparator = leaf.operation.comparator().unwrap_or("==");
    format!(
        "doc['{}'].value {} {}",
        leaf.field,
        comparator,
        script_scalar(&leaf.value)
    )
}

/// Script expression for one classified shape
fn shape_script(shape: &ConditionShape) -> String {
    match shape {
        ConditionShape::Simple(leaf) => script_fragment(leaf),
        ConditionShape::OrGroup(leaves) => {
            let fragments: Vec<String> = leaves.iter().map(script_fragment).collect();
            format!("({})", fragments.join("||"))
        }
    }
}

/// Term-level node for one shape; OR-groups nest as `bool.should`
fn shape_node(shape: &ConditionShape) -> QueryNode {
    match shape {
        ConditionShape::Simple(leaf) => term_node(leaf),
        ConditionShape::OrGroup(leaves) => QueryNode::Bool(BoolNode {
            should: leaves.iter().map(term_node).collect(),
            ..Default::default()
        }),
    }
}

/// Assemble the filter tree from classified conditions
///
/// Returns `None` when no conditions were supplied: an unfiltered query
/// carries no filter tree at all.
pub fn build_filter(
    conditions: &[ClassifiedCondition],
    combinator: Combinator,
) -> Option<FilterTree> {
    if conditions.is_empty() {
        return None;
    }

    let mut positive: Vec<&ConditionShape> = Vec::new();
    let mut negative: Vec<&ConditionShape> = Vec::new();
    let mut arithmetic: Vec<&ConditionShape> = Vec::new();
    for condition in conditions {
        match condition.bucket {
            Bucket::Positive => positive.push(&condition.shape),
            Bucket::Negative => negative.push(&condition.shape),
            Bucket::Arithmetic => arithmetic.push(&condition.shape),
        }
    }

    let mut root = BoolNode::default();

    let mut combined: Vec<QueryNode> = positive.iter().map(|shape| shape_node(shape)).collect();

    if !arithmetic.is_empty() {
        let joiner = match combinator {
            Combinator::And => "&&",
            Combinator::Or => "||",
        };
        let source = arithmetic
            .iter()
            .map(|shape| shape_script(shape))
            .collect::<Vec<String>>()
            .join(joiner);
        combined.push(QueryNode::Script { source });
    }

    match combinator {
        Combinator::And => root.must = combined,
        Combinator::Or => root.should = combined,
    }

    root.must_not = negative.iter().map(|shape| shape_node(shape)).collect();

    Some(FilterTree { root })
}
