//! # connmock-sqlite
//!
//! A small SQLite backend for the connectivity API, built on rusqlite. It
//! gives connmock proxies a real delegate: statements run real SQL and
//! result sets carry real rows.
//!
//! Savepoints, large objects and callable statements are not supported and
//! fail with a feature-not-supported error.

pub mod connection;
pub mod driver;
pub mod errors;
pub mod metadata;
pub mod result_set;
pub mod statement;
mod value;

pub use connection::SqliteConnection;
pub use driver::SqliteDriver;
pub use errors::{to_sql_error, BackendError};
pub use metadata::{SqliteDatabaseMetaData, SqliteParameterMetaData, SqliteResultSetMetaData};
pub use result_set::SqliteResultSet;
pub use statement::SqliteStatement;

/// URL prefix handled by [`SqliteDriver`].
pub const URL_PREFIX: &str = "jdbc:sqlite:";

/// Name reported by the driver and its metadata.
pub const DRIVER_NAME: &str = "connmock-sqlite";
