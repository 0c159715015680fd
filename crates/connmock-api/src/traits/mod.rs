//! The interfaces of the connectivity API.
//!
//! Column and parameter positions are numbered from 1. Every object is
//! shared behind an `Arc` and uses interior mutability, so all methods take
//! `&self`.

pub mod connection;
pub mod driver;
pub mod lob;
pub mod metadata;
pub mod result_set;
pub mod statement;

pub use connection::{Connection, Savepoint};
pub use driver::{Driver, DriverPropertyInfo};
pub use lob::{Blob, Clob, NClob};
pub use metadata::{DatabaseMetaData, ParameterMetaData, ResultSetMetaData};
pub use result_set::ResultSet;
pub use statement::{CallableStatement, PreparedStatement, Statement};
