//! Error types for sort and pagination configuration.
//!
//! Source failures (connectivity, malformed SQL) are not represented here:
//! every [`DataSource`](crate::DataSource) reports its own error type and the
//! provider hands it back untouched.

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Validation failures raised while configuring sorting or pagination.
///
/// All of these are caller-programming errors: they are raised immediately
/// and never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Page size below 1.
    #[error("page size should be at least 1, got {0}")]
    InvalidPageSize(i64),

    /// Page number below 1.
    #[error("current page should be at least 1, got {0}")]
    InvalidPage(i64),

    /// A sort link was requested for a column that was never declared.
    #[error("unknown sort column: {0}")]
    UnknownColumn(String),

    /// A sort link was requested for a declared column whose name cannot be
    /// written in a directive: blank, padded with whitespace, starting with
    /// `-` or containing the separator.
    #[error("sort column {0:?} cannot be written in a sort directive")]
    UnencodableColumn(String),

    /// A key selector that cannot address a row field.
    #[error("invalid key selector: {0}")]
    InvalidKeySelector(String),

    /// A pagination parameter that is not an integer.
    #[error("parameter `{name}` must be an integer, got {value:?}")]
    InvalidParam {
        /// Parameter name.
        name: String,
        /// Raw value as received.
        value: String,
    },

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` for page size, page number and parameter errors.
    #[inline]
    #[must_use]
    pub const fn is_pagination_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPageSize(_) | Self::InvalidPage(_) | Self::InvalidParam { .. }
        )
    }

    /// Returns `true` for errors raised by sort link generation.
    #[inline]
    #[must_use]
    pub const fn is_sort_error(&self) -> bool {
        matches!(self, Self::UnknownColumn(_) | Self::UnencodableColumn(_))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
