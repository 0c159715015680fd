//! No-op backend: a driver whose connection accepts every call and returns
//! empty values. It is the default delegate for scripted tests that only
//! care about the steps.

mod driver;
mod objects;

pub use driver::NoopDriver;
pub use objects::{
    NoopBlob, NoopClob, NoopConnection, NoopDatabaseMetaData, NoopParameterMetaData,
    NoopResultSet, NoopResultSetMetaData, NoopSavepoint, NoopStatement, StatementKind,
};

/// URL accepted by [`NoopDriver`], alone or followed by `:` and anything.
pub const NOOP_URL: &str = "jdbc:noop";

/// Product and driver name reported by the no-op metadata.
pub const NOOP_PRODUCT: &str = "noop";
