//! Error types for query compilation and search dispatch

use thiserror::Error;

/// Result type for compiler and processor operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while compiling or dispatching a search
#[derive(Debug, Error)]
pub enum SearchError {
    /// Unrecognized search operation token
    #[error("Invalid search operation: {0}")]
    InvalidOperation(String),

    /// Unrecognized sort direction token
    #[error("Invalid sort direction: {0}")]
    InvalidSortDirection(String),

    /// A condition was supplied with no values
    #[error("Condition on field '{0}' has an empty value list")]
    EmptyValueList(String),

    /// The search-engine collaborator reported a failure
    #[error("Search execution failed: {0}")]
    ExecutionFailed(String),
}

impl SearchError {
    /// Wrap any engine-client failure into the single execution category
    pub fn execution(err: impl std::fmt::Display) -> Self {
        SearchError::ExecutionFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::InvalidOperation("FUZZY".to_string());
        assert_eq!(err.to_string(), "Invalid search operation: FUZZY");

        let err = SearchError::EmptyValueList("status".to_string());
        assert_eq!(
            err.to_string(),
            "Condition on field 'status' has an empty value list"
        );
    }

    #[test]
    fn test_execution_wrapping() {
        let err = SearchError::execution("connection refused");
        assert!(matches!(err, SearchError::ExecutionFailed(_)));
        assert_eq!(err.to_string(), "Search execution failed: connection refused");
    }
}
