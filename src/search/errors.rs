//! Search error types
//!
//! Error codes:
//! - SHOP_UNSUPPORTED_FILTER_KIND (REJECT)
//! - SHOP_INVALID_FILTER (REJECT)
//! - SHOP_INVALID_REQUEST (REJECT)
//!
//! Every search error is raised while the request is being typed, before
//! a plan exists and before the engine is contacted.

use std::fmt;

/// Search-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Filter `type` is neither `term` nor `range`
    ShopUnsupportedFilterKind,
    /// Filter is missing a required field
    ShopInvalidFilter,
    /// Request body could not be parsed
    ShopInvalidRequest,
}

impl SearchErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SearchErrorCode::ShopUnsupportedFilterKind => "SHOP_UNSUPPORTED_FILTER_KIND",
            SearchErrorCode::ShopInvalidFilter => "SHOP_INVALID_FILTER",
            SearchErrorCode::ShopInvalidRequest => "SHOP_INVALID_REQUEST",
        }
    }

    /// HTTP status equivalent. All search errors are caller errors.
    pub fn status_code(&self) -> u16 {
        400
    }
}

impl fmt::Display for SearchErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Search error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchError {
    /// Error code
    code: SearchErrorCode,
    /// Human-readable message
    message: String,
    /// Offending filter key if applicable
    field: Option<String>,
}

impl SearchError {
    /// Create an unsupported filter kind error
    pub fn unsupported_filter_kind(kind: impl Into<String>, field: impl Into<String>) -> Self {
        let kind = kind.into();
        let field = field.into();
        Self {
            code: SearchErrorCode::ShopUnsupportedFilterKind,
            message: format!("Unknown filter type '{}' on field '{}'", kind, field),
            field: Some(field),
        }
    }

    /// Create an invalid filter error
    pub fn invalid_filter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            code: SearchErrorCode::ShopInvalidFilter,
            message: format!("Invalid filter on field '{}': {}", field, reason.into()),
            field: Some(field),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self {
            code: SearchErrorCode::ShopInvalidRequest,
            message: reason.into(),
            field: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SearchErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the filter key if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// HTTP status equivalent
    pub fn status_code(&self) -> u16 {
        self.code.status_code()
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REJECT] {}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SearchError {}

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;
