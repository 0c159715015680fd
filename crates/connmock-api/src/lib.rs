//! # connmock-api
//!
//! The connectivity API that connmock intercepts: a driver produces
//! connections, connections produce statements and metadata, statements
//! produce result sets. Every object in the family is a `Handle` and can be
//! carried type-erased as an [`ApiObject`].
//!
//! Backends (the no-op backend, SQLite) implement these traits; the
//! interception engine in `connmock` implements them again as proxies.

pub mod errors;
pub mod handle;
pub mod interface;
pub mod properties;
pub mod registry;
pub mod traits;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use errors::{
    ClientInfoError, Error, Narrow, Result, RuntimeFailure, SqlError, SqlErrorKind, UsageError,
};
pub use handle::{ApiObject, ApiType, Handle, ObjectId};
pub use interface::Interface;
pub use properties::Properties;
pub use registry::DriverRegistry;
pub use traits::{
    Blob, CallableStatement, Clob, Connection, DatabaseMetaData, Driver, DriverPropertyInfo,
    NClob, ParameterMetaData, PreparedStatement, ResultSet, ResultSetMetaData, Savepoint,
    Statement,
};
pub use value::SqlValue;
