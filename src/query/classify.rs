//! Condition classification
//!
//! Maps one [`PropertyCondition`] into an engine-agnostic
//! [`ClassifiedCondition`]: a bucket tag deciding how the condition combines
//! (Positive, Negative, Arithmetic) plus a shape, either a bare
//! [`SimpleCondition`] or an OR-group of them.

use serde_json::Value;

use crate::error::{Result, SearchError};
use crate::registry::FieldRegistry;
use crate::request::{PropertyCondition, SearchOperation, ALL_FIELDS};

/// How a condition participates in the final filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Combined with `must`/`should` per the request combinator
    Positive,

    /// Always AND-excluded via `must_not`
    Negative,

    /// Rendered into a scripted comparison expression
    Arithmetic,
}

/// A single field/operation/value leaf
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleCondition {
    pub operation: SearchOperation,
    pub field: String,
    pub value: Value,
}

/// Shape of a classified condition
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionShape {
    Simple(SimpleCondition),
    OrGroup(Vec<SimpleCondition>),
}

/// One classified condition: pure data derived from one input condition
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedCondition {
    pub bucket: Bucket,
    pub shape: ConditionShape,
}

impl SearchOperation {
    /// Bucket this operation belongs to
    pub fn bucket(&self) -> Bucket {
        match self {
            SearchOperation::Equal
            | SearchOperation::StartsWith
            | SearchOperation::EndsWith
            | SearchOperation::Like
            | SearchOperation::Contains
            | SearchOperation::Exists => Bucket::Positive,
            SearchOperation::NotEqual
            | SearchOperation::NotLike
            | SearchOperation::NotExists => Bucket::Negative,
            SearchOperation::GreaterThan
            | SearchOperation::GreaterThanEquals
            | SearchOperation::LessThan
            | SearchOperation::LessThanEquals => Bucket::Arithmetic,
        }
    }
}

/// Prefix and wildcard matching is case-folded at the raw field
fn normalize_value(operation: SearchOperation, value: &Value) -> Value {
    match (operation, value) {
        (SearchOperation::StartsWith | SearchOperation::EndsWith, Value::String(s)) => {
            Value::String(s.to_lowercase())
        }
        _ => value.clone(),
    }
}

fn simple(operation: SearchOperation, field: &str, value: &Value) -> SimpleCondition {
    SimpleCondition {
        operation,
        field: field.to_string(),
        value: normalize_value(operation, value),
    }
}

/// Classify one condition against the registry
///
/// An all-field (`*`) condition expands to an OR-group over every searchable
/// field, using only the first supplied value. Any other condition with more
/// than one value expands to an OR-group with one leaf per value.
pub fn classify(
    condition: &PropertyCondition,
    registry: &dyn FieldRegistry,
) -> Result<ClassifiedCondition> {
    let first = condition
        .values
        .first()
        .ok_or_else(|| SearchError::EmptyValueList(condition.field.clone()))?;

    let operation = condition.operation;
    let bucket = operation.bucket();

    let shape = if condition.field == ALL_FIELDS {
        let leaves = registry
            .searchable_fields()
            .iter()
            .map(|field| simple(operation, field, first))
            .collect();
        ConditionShape::OrGroup(leaves)
    } else if condition.values.len() > 1 {
        let leaves = condition
            .values
            .iter()
            .map(|value| simple(operation, &condition.field, value))
            .collect();
        ConditionShape::OrGroup(leaves)
    } else {
        ConditionShape::Simple(simple(operation, &condition.field, first))
    };

    Ok(ClassifiedCondition { bucket, shape })
}
