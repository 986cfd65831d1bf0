//! Sort resolution
//!
//! Full queries with no explicit sort fall back to ascending `name`. Field
//! names resolve to their raw form unless the registry knows them as date
//! fields, which sort on the bare name. Count queries never carry a sort.

use serde_json::{Map, Value};

use crate::registry::{raw_field, FieldRegistry};
use crate::request::SortDirection;

/// Default sort field applied when a sortable request has no sort spec
const DEFAULT_SORT_FIELD: &str = "name";

/// One resolved sort entry; `field` is already suffix-resolved
#[derive(Debug, Clone, PartialEq)]
pub struct SortEntry {
    pub field: String,
    pub direction: SortDirection,
}

/// Ordered sort specification
pub type SortList = Vec<SortEntry>;

/// Serialize a sort list to the engine's `sort` array
pub fn sort_to_value(sort: &SortList) -> Value {
    let entries: Vec<Value> = sort
        .iter()
        .map(|entry| {
            let mut map = Map::new();
            map.insert(
                entry.field.clone(),
                Value::String(entry.direction.to_string()),
            );
            Value::Object(map)
        })
        .collect();
    Value::Array(entries)
}

/// Resolve the final sort sequence
///
/// `sortable` is false for count queries, which never sort.
pub fn resolve_sort(
    sort_by: &[(String, SortDirection)],
    sortable: bool,
    registry: &dyn FieldRegistry,
) -> Option<SortList> {
    if !sortable {
        return None;
    }

    let resolve = |field: &str, direction: SortDirection| SortEntry {
        field: if registry.is_date_field(field) {
            field.to_string()
        } else {
            raw_field(field)
        },
        direction,
    };

    let entries = if sort_by.is_empty() {
        vec![resolve(DEFAULT_SORT_FIELD, SortDirection::Asc)]
    } else {
        sort_by
            .iter()
            .map(|(field, direction)| resolve(field, *direction))
            .collect()
    };

    Some(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FieldRegistry, StaticFieldRegistryBuilder};
    use serde_json::json;

    fn registry() -> impl FieldRegistry {
        StaticFieldRegistryBuilder::new()
            .date_fields(vec!["lastUpdatedOn"])
            .build()
    }

    #[test]
    fn test_count_queries_never_sort() {
        let sort_by = vec![("name".to_string(), SortDirection::Asc)];
        assert_eq!(resolve_sort(&sort_by, false, &registry()), None);
    }

    #[test]
    fn test_empty_spec_gets_default_name_ascending() {
        let sort = resolve_sort(&[], true, &registry()).unwrap();
        assert_eq!(
            sort,
            vec![SortEntry {
                field: "name.raw".to_string(),
                direction: SortDirection::Asc,
            }]
        );
    }

    #[test]
    fn test_date_fields_keep_their_bare_name() {
        let sort_by = vec![
            ("lastUpdatedOn".to_string(), SortDirection::Desc),
            ("subject".to_string(), SortDirection::Asc),
        ];
        let sort = resolve_sort(&sort_by, true, &registry()).unwrap();

        assert_eq!(sort[0].field, "lastUpdatedOn");
        assert_eq!(sort[1].field, "subject.raw");
    }

    #[test]
    fn test_order_is_preserved() {
        let sort_by = vec![
            ("board".to_string(), SortDirection::Desc),
            ("grade".to_string(), SortDirection::Asc),
        ];
        let sort = resolve_sort(&sort_by, true, &registry()).unwrap();

        let fields: Vec<_> = sort.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["board.raw", "grade.raw"]);
    }

    #[test]
    fn test_sort_serialization() {
        let sort = vec![
            SortEntry {
                field: "name.raw".to_string(),
                direction: SortDirection::Asc,
            },
            SortEntry {
                field: "lastUpdatedOn".to_string(),
                direction: SortDirection::Desc,
            },
        ];

        assert_eq!(
            sort_to_value(&sort),
            json!([
                { "name.raw": "asc" },
                { "lastUpdatedOn": "desc" }
            ])
        );
    }
}
