//! Deployment-level defaults for sorting and pagination.
//!
//! Every field is optional in the source document; missing fields take the
//! values from [`constants`](crate::constants).
//!
//! ```
//! use data_provider::ProviderConfig;
//!
//! let config = ProviderConfig::from_toml_str(
//!     r#"
//!     [sort]
//!     param = "order"
//!     multi_sort = true
//!
//!     [pagination]
//!     page_size = 25
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.sort.param, "order");
//! assert_eq!(config.sort.separator, ',');
//! assert_eq!(config.pagination.page_size, 25);
//! assert_eq!(config.pagination.page_param, "page");
//! ```

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::constants::{
    DEFAULT_PAGE_PARAM, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_PARAM, DEFAULT_SEPARATOR,
    DEFAULT_SORT_PARAM,
};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// Sorting defaults.
    pub sort: SortConfig,
    /// Pagination defaults.
    pub pagination: PaginationConfig,
}

impl ProviderConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Parse a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

/// Sorting defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortConfig {
    /// Request parameter holding the directive.
    pub param: String,
    /// Directive token separator.
    pub separator: char,
    /// Whether several columns may be active at once.
    pub multi_sort: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            param: DEFAULT_SORT_PARAM.to_string(),
            separator: DEFAULT_SEPARATOR,
            multi_sort: false,
        }
    }
}

/// Pagination defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    /// Rows per page when the request does not say.
    pub page_size: u64,
    /// Request parameter holding the page number.
    pub page_param: String,
    /// Request parameter holding the page size.
    pub page_size_param: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_param: DEFAULT_PAGE_PARAM.to_string(),
            page_size_param: DEFAULT_PAGE_SIZE_PARAM.to_string(),
        }
    }
}
