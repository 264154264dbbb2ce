//! Error types for the browse crate.

use thiserror::Error;

/// Errors raised at the configuration boundary.
///
/// Query evaluation itself is total: missing attributes, type mismatches and
/// empty results are never errors. Only cursor configuration and descriptor
/// parsing can fail, and a failed operation leaves state untouched.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// Page size must be at least one.
    #[error("invalid page size {size}: must be at least 1")]
    InvalidPageSize { size: usize },

    /// Requested page lies outside `1..=total_pages`.
    #[error("page {page} is out of range (1..={total_pages})")]
    PageOutOfRange { page: usize, total_pages: usize },

    /// Descriptor JSON could not be parsed.
    #[error("invalid query descriptor: {0}")]
    InvalidDescriptor(#[from] serde_json::Error),

    /// Sort direction other than `asc` or `desc`.
    #[error("unknown sort direction '{0}': expected 'asc' or 'desc'")]
    UnknownSortDirection(String),
}

/// Result type for browse operations.
pub type Result<T> = std::result::Result<T, BrowseError>;
