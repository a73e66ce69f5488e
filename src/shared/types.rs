use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Envelope around every JSON body the API returns
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Paging position of a list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl Meta {
    pub fn for_page(total: i64, pagination: &PaginationQuery) -> Self {
        let page_size = pagination.limit();
        Self {
            total,
            page: pagination.page.max(1),
            page_size,
            total_pages: (total.max(0) + page_size - 1) / page_size,
        }
    }
}

/// Page/page_size query parameters shared by the history, offer and notification lists
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    /// Get clamped page_size (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_offset_and_limit() {
        let query = PaginationQuery {
            page: 3,
            page_size: 20,
        };
        assert_eq!(query.offset(), 40);
        assert_eq!(query.limit(), 20);
    }

    #[test]
    fn test_pagination_clamps_out_of_range_values() {
        let query = PaginationQuery {
            page: 0,
            page_size: 1_000,
        };
        assert_eq!(query.limit(), MAX_PAGE_SIZE);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_meta_counts_partial_last_page() {
        let query = PaginationQuery {
            page: 2,
            page_size: 10,
        };
        let meta = Meta::for_page(21, &query);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.page, 2);
        assert_eq!(meta.page_size, 10);

        assert_eq!(Meta::for_page(0, &query).total_pages, 0);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = Meta::for_page(5, &PaginationQuery::default());
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["pageSize"], DEFAULT_PAGE_SIZE);
        assert_eq!(json["totalPages"], 1);
    }

    #[test]
    fn test_error_envelope_omits_meta() {
        let json = serde_json::to_value(ApiResponse::<()>::error(
            Some("GPS coordinates invalid".to_string()),
            None,
        ))
        .unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("meta").is_none());
        assert!(json.get("errors").is_none());
    }
}
