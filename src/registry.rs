//! Field registry: the index-schema knowledge the compiler consults
//!
//! The compiler never talks to the engine's mapping API. Everything it needs
//! to know about the index (which fields participate in all-field text
//! search, which fields are date-typed, and how many buckets a terms
//! aggregation returns by default) comes from a [`FieldRegistry`].

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Suffix selecting the unanalyzed (exact-match) form of a text field
pub const RAW_FIELD_SUFFIX: &str = ".raw";

/// Resolve a field name to its raw/keyword form
pub fn raw_field(field: &str) -> String {
    format!("{}{}", field, RAW_FIELD_SUFFIX)
}

static DEFAULT_SEARCH_FIELDS: Lazy<Vec<String>> = Lazy::new(|| {
    ["name", "code", "description", "keywords"]
        .iter()
        .map(|s| s.to_string())
        .collect()
});

static DEFAULT_DATE_FIELDS: Lazy<Vec<String>> = Lazy::new(|| {
    ["createdOn", "lastUpdatedOn"]
        .iter()
        .map(|s| s.to_string())
        .collect()
});

/// Schema knowledge required by the query compiler
pub trait FieldRegistry: Send + Sync {
    /// Fields expanded by an all-field (`*`) condition
    fn searchable_fields(&self) -> &[String];

    /// Whether `field` is date-typed (date fields carry no raw form)
    fn is_date_field(&self, field: &str) -> bool;

    /// Bucket count for terms aggregations
    fn default_aggregation_size(&self) -> usize;
}

/// Registry backed by static configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticFieldRegistry {
    /// Fields covered by all-field text search
    pub searchable_fields: Vec<String>,

    /// Date-typed fields
    pub date_fields: Vec<String>,

    /// Default terms-aggregation bucket count
    pub default_aggregation_size: usize,
}

impl Default for StaticFieldRegistry {
    fn default() -> Self {
        Self {
            searchable_fields: DEFAULT_SEARCH_FIELDS.clone(),
            date_fields: DEFAULT_DATE_FIELDS.clone(),
            default_aggregation_size: 100,
        }
    }
}

impl FieldRegistry for StaticFieldRegistry {
    fn searchable_fields(&self) -> &[String] {
        &self.searchable_fields
    }

    fn is_date_field(&self, field: &str) -> bool {
        self.date_fields.iter().any(|f| f == field)
    }

    fn default_aggregation_size(&self) -> usize {
        self.default_aggregation_size
    }
}

/// Builder for [`StaticFieldRegistry`]
pub struct StaticFieldRegistryBuilder {
    registry: StaticFieldRegistry,
}

impl StaticFieldRegistryBuilder {
    pub fn new() -> Self {
        Self {
            registry: StaticFieldRegistry::default(),
        }
    }

    pub fn searchable_fields(mut self, fields: Vec<impl Into<String>>) -> Self {
        self.registry.searchable_fields = fields.into_iter().map(|f| f.into()).collect();
        self
    }

    pub fn date_fields(mut self, fields: Vec<impl Into<String>>) -> Self {
        self.registry.date_fields = fields.into_iter().map(|f| f.into()).collect();
        self
    }

    pub fn default_aggregation_size(mut self, size: usize) -> Self {
        self.registry.default_aggregation_size = size;
        self
    }

    pub fn build(self) -> StaticFieldRegistry {
        self.registry
    }
}

impl Default for StaticFieldRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
