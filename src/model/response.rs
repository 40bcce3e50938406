use serde::{Deserialize, Serialize};

/// Pagination descriptor attached to sliced listings. Field names follow
/// the wire format (`totalPages`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Outcome envelope shared by catalog queries and the data source adapter.
///
/// Routine failures (missing files, malformed documents) collapse into
/// `Success` with a safe default payload upstream of this type; only
/// lookups that genuinely miss and install failures surface as `Failure`.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult<T> {
    Success {
        data: T,
        total: Option<usize>,
        pagination: Option<Pagination>,
    },
    Failure {
        message: String,
    },
}

impl<T> QueryResult<T> {
    pub fn success(data: T) -> Self {
        QueryResult::Success {
            data,
            total: None,
            pagination: None,
        }
    }

    pub fn with_total(data: T, total: usize) -> Self {
        QueryResult::Success {
            data,
            total: Some(total),
            pagination: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        QueryResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryResult::Success { .. })
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            QueryResult::Success { data, .. } => Some(data),
            QueryResult::Failure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_carries_optional_total() {
        let result = QueryResult::with_total(vec![1, 2], 2);
        assert!(result.is_success());
        match result {
            QueryResult::Success { total, .. } => assert_eq!(total, Some(2)),
            QueryResult::Failure { .. } => panic!("expected success"),
        }
    }

    #[test]
    fn failure_yields_no_data() {
        let result: QueryResult<Vec<u8>> = QueryResult::failure("missing");
        assert!(!result.is_success());
        assert_eq!(result.into_data(), None);
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let descriptor = Pagination {
            page: 2,
            limit: 20,
            total: 25,
            total_pages: 2,
        };
        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains("\"totalPages\":2"));
    }
}
