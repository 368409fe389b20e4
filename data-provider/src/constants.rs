//! Centralized defaults for the data-provider crate.
//!
//! Every value here can be overridden per request through the builder
//! methods, or per deployment through [`ProviderConfig`](crate::ProviderConfig).

// ============================================================================
// SORT DEFAULTS
// ============================================================================

/// Request parameter that carries the sort directive.
pub const DEFAULT_SORT_PARAM: &str = "sort";

/// Character separating the tokens of a sort directive.
pub const DEFAULT_SEPARATOR: char = ',';

/// Prefix marking a directive token as descending.
pub const DESCENDING_PREFIX: char = '-';

// ============================================================================
// PAGINATION DEFAULTS
// ============================================================================

/// Number of rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// First page number. Pages are 1-based.
pub const FIRST_PAGE: u64 = 1;

/// Request parameter that carries the current page number.
pub const DEFAULT_PAGE_PARAM: &str = "page";

/// Request parameter that carries the page size.
pub const DEFAULT_PAGE_SIZE_PARAM: &str = "per-page";
