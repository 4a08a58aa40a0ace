use std::time::Duration;
use thiserror::Error;

use crate::models::QueryDialect;

/// Faults raised while building a scraper. These are the only errors that
/// leave the scraper layer.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("invalid selector configuration: {0}")]
    InvalidSelectors(#[from] serde_json::Error),

    #[error("selector for field `{field}` is empty")]
    EmptySelector { field: String },
}

/// Failure reported by a page-query handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("element did not appear within {0:?}")]
    Timeout(Duration),

    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    #[error("{0} queries are not supported by this page")]
    UnsupportedDialect(QueryDialect),

    #[error("driver error: {0}")]
    Driver(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceParseError {
    #[error("price text is empty")]
    Empty,

    #[error("price text `{0}` is not a number")]
    Invalid(String),
}

/// Why an extraction operation fell back to its sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    #[error("no selector configured for `{field}`")]
    MissingSelector { field: &'static str },

    #[error("no element matched `{field}`")]
    NotFound { field: &'static str },

    #[error("no elements matched `{field}`")]
    NoMatches { field: &'static str },

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Parse(#[from] PriceParseError),
}
