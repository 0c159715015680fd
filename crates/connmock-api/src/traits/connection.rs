//! Connection and savepoint interfaces.

use std::sync::Arc;

use crate::errors::{ClientInfoError, Result};
use crate::handle::Handle;
use crate::traits::lob::{Blob, Clob, NClob};
use crate::traits::metadata::DatabaseMetaData;
use crate::traits::statement::{CallableStatement, PreparedStatement, Statement};

/// A session with a backend.
pub trait Connection: Handle {
    fn create_statement(&self) -> Result<Arc<dyn Statement>>;
    fn prepare_statement(&self, sql: &str) -> Result<Arc<dyn PreparedStatement>>;
    fn prepare_call(&self, sql: &str) -> Result<Arc<dyn CallableStatement>>;
    fn native_sql(&self, sql: &str) -> Result<String>;

    fn set_auto_commit(&self, auto_commit: bool) -> Result<()>;
    fn auto_commit(&self) -> Result<bool>;
    fn commit(&self) -> Result<()>;
    fn rollback(&self) -> Result<()>;
    fn set_savepoint(&self, name: Option<&str>) -> Result<Arc<dyn Savepoint>>;

    fn metadata(&self) -> Result<Arc<dyn DatabaseMetaData>>;
    fn set_read_only(&self, read_only: bool) -> Result<()>;
    fn is_read_only(&self) -> Result<bool>;

    /// Only fails with client-info errors.
    fn set_client_info(&self, name: &str, value: &str) -> Result<(), ClientInfoError>;
    fn client_info(&self, name: &str) -> Result<Option<String>>;
    fn is_valid(&self, timeout_secs: i32) -> Result<bool>;

    fn create_blob(&self) -> Result<Arc<dyn Blob>>;
    fn create_clob(&self) -> Result<Arc<dyn Clob>>;
    fn create_nclob(&self) -> Result<Arc<dyn NClob>>;

    fn close(&self) -> Result<()>;
    fn is_closed(&self) -> Result<bool>;
}

/// A named or numbered point inside a transaction.
pub trait Savepoint: Handle {
    fn id(&self) -> Result<i32>;
    fn name(&self) -> Result<String>;
}
