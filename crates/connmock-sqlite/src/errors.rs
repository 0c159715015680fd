//! Backend failures and their mapping onto connectivity errors.

use connmock_api::errors::{STATE_CONNECTION_CLOSED, STATE_FEATURE_NOT_SUPPORTED};
use connmock_api::{Error, SqlError};

/// SQL state for failures reported by SQLite itself.
pub const STATE_GENERAL: &str = "HY000";
/// SQL state for a bad parameter or column position.
pub const STATE_INVALID_INDEX: &str = "07009";
/// SQL state for reading a result set outside a row.
pub const STATE_INVALID_CURSOR: &str = "24000";

/// Failures detected by this backend before SQLite is involved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("{object} is closed")]
    Closed { object: &'static str },

    #[error("position {index} is out of range 1..={count}")]
    Index { index: usize, count: usize },

    #[error("no column named {label}")]
    UnknownColumn { label: String },

    #[error("result set is not positioned on a row")]
    NoCurrentRow,

    #[error("unsupported url {url}")]
    BadUrl { url: String },

    #[error("{feature} is not supported by the SQLite backend")]
    NotSupported { feature: &'static str },
}

impl BackendError {
    fn sql_state(&self) -> &'static str {
        match self {
            BackendError::Closed { .. } => STATE_CONNECTION_CLOSED,
            BackendError::Index { .. } | BackendError::UnknownColumn { .. } => STATE_INVALID_INDEX,
            BackendError::NoCurrentRow => STATE_INVALID_CURSOR,
            BackendError::BadUrl { .. } => STATE_GENERAL,
            BackendError::NotSupported { .. } => STATE_FEATURE_NOT_SUPPORTED,
        }
    }
}

impl From<BackendError> for SqlError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::NotSupported { .. } => SqlError::feature_not_supported(error.to_string()),
            other => SqlError::with_state(other.to_string(), other.sql_state()),
        }
    }
}

impl From<BackendError> for Error {
    fn from(error: BackendError) -> Self {
        Error::Sql(error.into())
    }
}

/// Maps a rusqlite failure, keeping SQLite's extended result code as the
/// vendor code.
pub fn to_sql_error(error: rusqlite::Error) -> Error {
    let code = error.sqlite_error().map_or(0, |e| e.extended_code);
    SqlError::with_code(error.to_string(), STATE_GENERAL, code).into()
}

pub(crate) fn not_supported<T>(feature: &'static str) -> connmock_api::Result<T> {
    Err(BackendError::NotSupported { feature }.into())
}

/// 1-based position check.
pub(crate) fn check_index(index: usize, count: usize) -> connmock_api::Result<usize> {
    if index == 0 || index > count {
        return Err(BackendError::Index { index, count }.into());
    }
    Ok(index - 1)
}
