//! Shared no-op objects, one per interface.

use std::sync::{Arc, LazyLock};

use connmock_api::{
    ApiObject, Blob, CallableStatement, ClientInfoError, Clob, Connection, DatabaseMetaData,
    Handle, Interface, NClob, ParameterMetaData, PreparedStatement, Result, ResultSet,
    ResultSetMetaData, Savepoint, SqlValue, Statement,
};

use crate::version::Version;

use super::{NOOP_PRODUCT, NOOP_URL};

macro_rules! singleton {
    ($name:ident: $ty:ty = $init:expr) => {
        static $name: LazyLock<Arc<$ty>> = LazyLock::new(|| Arc::new($init));
    };
}

// ─── Connection ─────────────────────────────────────────────────────────────

/// Connection that accepts every call and returns empty values.
#[derive(Debug)]
pub struct NoopConnection {
    _private: (),
}

singleton!(CONNECTION: NoopConnection = NoopConnection { _private: () });

impl NoopConnection {
    pub fn shared() -> Arc<NoopConnection> {
        Arc::clone(&CONNECTION)
    }
}

impl Handle for NoopConnection {
    fn interface(&self) -> Interface {
        Interface::Connection
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        ApiObject::Connection(self)
    }
}

impl Connection for NoopConnection {
    fn create_statement(&self) -> Result<Arc<dyn Statement>> {
        Ok(NoopStatement::shared(StatementKind::Plain))
    }

    fn prepare_statement(&self, _sql: &str) -> Result<Arc<dyn PreparedStatement>> {
        Ok(NoopStatement::shared(StatementKind::Prepared))
    }

    fn prepare_call(&self, _sql: &str) -> Result<Arc<dyn CallableStatement>> {
        Ok(NoopStatement::shared(StatementKind::Callable))
    }

    fn native_sql(&self, sql: &str) -> Result<String> {
        Ok(sql.to_string())
    }

    fn set_auto_commit(&self, _auto_commit: bool) -> Result<()> {
        Ok(())
    }

    fn auto_commit(&self) -> Result<bool> {
        Ok(true)
    }

    fn commit(&self) -> Result<()> {
        Ok(())
    }

    fn rollback(&self) -> Result<()> {
        Ok(())
    }

    fn set_savepoint(&self, _name: Option<&str>) -> Result<Arc<dyn Savepoint>> {
        Ok(NoopSavepoint::shared())
    }

    fn metadata(&self) -> Result<Arc<dyn DatabaseMetaData>> {
        Ok(NoopDatabaseMetaData::shared())
    }

    fn set_read_only(&self, _read_only: bool) -> Result<()> {
        Ok(())
    }

    fn is_read_only(&self) -> Result<bool> {
        Ok(false)
    }

    fn set_client_info(&self, _name: &str, _value: &str) -> Result<(), ClientInfoError> {
        Ok(())
    }

    fn client_info(&self, _name: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn is_valid(&self, _timeout_secs: i32) -> Result<bool> {
        Ok(true)
    }

    fn create_blob(&self) -> Result<Arc<dyn Blob>> {
        Ok(NoopBlob::shared())
    }

    fn create_clob(&self) -> Result<Arc<dyn Clob>> {
        Ok(NoopClob::shared(false))
    }

    fn create_nclob(&self) -> Result<Arc<dyn NClob>> {
        Ok(NoopClob::shared(true))
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }

    fn is_closed(&self) -> Result<bool> {
        Ok(false)
    }
}

#[derive(Debug)]
pub struct NoopSavepoint {
    _private: (),
}

singleton!(SAVEPOINT: NoopSavepoint = NoopSavepoint { _private: () });

impl NoopSavepoint {
    pub fn shared() -> Arc<NoopSavepoint> {
        Arc::clone(&SAVEPOINT)
    }
}

impl Handle for NoopSavepoint {
    fn interface(&self) -> Interface {
        Interface::Savepoint
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        ApiObject::Savepoint(self)
    }
}

impl Savepoint for NoopSavepoint {
    fn id(&self) -> Result<i32> {
        Ok(0)
    }

    fn name(&self) -> Result<String> {
        Ok(String::new())
    }
}

// ─── Statements ─────────────────────────────────────────────────────────────

/// Which statement interface a [`NoopStatement`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Plain,
    Prepared,
    Callable,
}

/// Statement of every kind; `kind` decides its most specific interface.
#[derive(Debug)]
pub struct NoopStatement {
    kind: StatementKind,
}

singleton!(PLAIN: NoopStatement = NoopStatement { kind: StatementKind::Plain });
singleton!(PREPARED: NoopStatement = NoopStatement { kind: StatementKind::Prepared });
singleton!(CALLABLE: NoopStatement = NoopStatement { kind: StatementKind::Callable });

impl NoopStatement {
    pub fn shared(kind: StatementKind) -> Arc<NoopStatement> {
        match kind {
            StatementKind::Plain => Arc::clone(&PLAIN),
            StatementKind::Prepared => Arc::clone(&PREPARED),
            StatementKind::Callable => Arc::clone(&CALLABLE),
        }
    }
}

impl Handle for NoopStatement {
    fn interface(&self) -> Interface {
        match self.kind {
            StatementKind::Plain => Interface::Statement,
            StatementKind::Prepared => Interface::PreparedStatement,
            StatementKind::Callable => Interface::CallableStatement,
        }
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        match self.kind {
            StatementKind::Plain => ApiObject::Statement(self),
            StatementKind::Prepared => ApiObject::PreparedStatement(self),
            StatementKind::Callable => ApiObject::CallableStatement(self),
        }
    }
}

impl Statement for NoopStatement {
    fn execute_query(&self, _sql: &str) -> Result<Arc<dyn ResultSet>> {
        Ok(NoopResultSet::shared())
    }

    fn execute_update(&self, _sql: &str) -> Result<i64> {
        Ok(0)
    }

    fn execute(&self, _sql: &str) -> Result<bool> {
        Ok(false)
    }

    fn result_set(&self) -> Result<Option<Arc<dyn ResultSet>>> {
        Ok(None)
    }

    fn update_count(&self) -> Result<i64> {
        Ok(-1)
    }

    fn connection(&self) -> Result<Arc<dyn Connection>> {
        Ok(NoopConnection::shared())
    }

    fn set_max_rows(&self, _max: i32) -> Result<()> {
        Ok(())
    }

    fn max_rows(&self) -> Result<i32> {
        Ok(0)
    }

    fn set_query_timeout(&self, _secs: i32) -> Result<()> {
        Ok(())
    }

    fn query_timeout(&self) -> Result<i32> {
        Ok(0)
    }

    fn add_batch(&self, _sql: &str) -> Result<()> {
        Ok(())
    }

    fn clear_batch(&self) -> Result<()> {
        Ok(())
    }

    fn execute_batch(&self) -> Result<Vec<i64>> {
        Ok(Vec::new())
    }

    fn cancel(&self) -> Result<()> {
        Ok(())
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }

    fn is_closed(&self) -> Result<bool> {
        Ok(false)
    }
}

impl PreparedStatement for NoopStatement {
    fn set_null(&self, _index: usize) -> Result<()> {
        Ok(())
    }

    fn set_int(&self, _index: usize, _value: i32) -> Result<()> {
        Ok(())
    }

    fn set_long(&self, _index: usize, _value: i64) -> Result<()> {
        Ok(())
    }

    fn set_double(&self, _index: usize, _value: f64) -> Result<()> {
        Ok(())
    }

    fn set_string(&self, _index: usize, _value: &str) -> Result<()> {
        Ok(())
    }

    fn set_bytes(&self, _index: usize, _value: &[u8]) -> Result<()> {
        Ok(())
    }

    fn set_value(&self, _index: usize, _value: SqlValue) -> Result<()> {
        Ok(())
    }

    fn clear_parameters(&self) -> Result<()> {
        Ok(())
    }

    fn execute_prepared_query(&self) -> Result<Arc<dyn ResultSet>> {
        Ok(NoopResultSet::shared())
    }

    fn execute_prepared_update(&self) -> Result<i64> {
        Ok(0)
    }

    fn execute_prepared(&self) -> Result<bool> {
        Ok(false)
    }

    fn parameter_metadata(&self) -> Result<Arc<dyn ParameterMetaData>> {
        Ok(NoopParameterMetaData::shared())
    }

    fn result_metadata(&self) -> Result<Option<Arc<dyn ResultSetMetaData>>> {
        Ok(None)
    }
}

impl CallableStatement for NoopStatement {
    fn register_out_parameter(&self, _index: usize, _sql_type: i32) -> Result<()> {
        Ok(())
    }

    fn was_null(&self) -> Result<bool> {
        Ok(true)
    }

    fn get_int(&self, _index: usize) -> Result<i32> {
        Ok(0)
    }

    fn get_long(&self, _index: usize) -> Result<i64> {
        Ok(0)
    }

    fn get_double(&self, _index: usize) -> Result<f64> {
        Ok(0.0)
    }

    fn get_string(&self, _index: usize) -> Result<Option<String>> {
        Ok(None)
    }

    fn get_value(&self, _index: usize) -> Result<SqlValue> {
        Ok(SqlValue::Null)
    }
}

// ─── Result sets and metadata ───────────────────────────────────────────────

/// Result set with no rows and no columns.
#[derive(Debug)]
pub struct NoopResultSet {
    _private: (),
}

singleton!(RESULT_SET: NoopResultSet = NoopResultSet { _private: () });

impl NoopResultSet {
    pub fn shared() -> Arc<NoopResultSet> {
        Arc::clone(&RESULT_SET)
    }
}

impl Handle for NoopResultSet {
    fn interface(&self) -> Interface {
        Interface::ResultSet
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        ApiObject::ResultSet(self)
    }
}

impl ResultSet for NoopResultSet {
    fn next(&self) -> Result<bool> {
        Ok(false)
    }

    fn get_int(&self, _column: usize) -> Result<i32> {
        Ok(0)
    }

    fn get_long(&self, _column: usize) -> Result<i64> {
        Ok(0)
    }

    fn get_double(&self, _column: usize) -> Result<f64> {
        Ok(0.0)
    }

    fn get_string(&self, _column: usize) -> Result<Option<String>> {
        Ok(None)
    }

    fn get_bytes(&self, _column: usize) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    fn get_value(&self, _column: usize) -> Result<SqlValue> {
        Ok(SqlValue::Null)
    }

    fn was_null(&self) -> Result<bool> {
        Ok(true)
    }

    fn find_column(&self, _label: &str) -> Result<usize> {
        Ok(1)
    }

    fn metadata(&self) -> Result<Arc<dyn ResultSetMetaData>> {
        Ok(NoopResultSetMetaData::shared())
    }

    fn statement(&self) -> Result<Option<Arc<dyn Statement>>> {
        Ok(Some(NoopStatement::shared(StatementKind::Plain)))
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }

    fn is_closed(&self) -> Result<bool> {
        Ok(false)
    }
}

#[derive(Debug)]
pub struct NoopResultSetMetaData {
    _private: (),
}

singleton!(RESULT_SET_METADATA: NoopResultSetMetaData = NoopResultSetMetaData { _private: () });

impl NoopResultSetMetaData {
    pub fn shared() -> Arc<NoopResultSetMetaData> {
        Arc::clone(&RESULT_SET_METADATA)
    }
}

impl Handle for NoopResultSetMetaData {
    fn interface(&self) -> Interface {
        Interface::ResultSetMetaData
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        ApiObject::ResultSetMetaData(self)
    }
}

impl ResultSetMetaData for NoopResultSetMetaData {
    fn column_count(&self) -> Result<usize> {
        Ok(0)
    }

    fn column_name(&self, _column: usize) -> Result<String> {
        Ok(String::new())
    }

    fn column_type_name(&self, _column: usize) -> Result<String> {
        Ok(SqlValue::Null.type_name().to_string())
    }

    fn is_nullable(&self, _column: usize) -> Result<bool> {
        Ok(true)
    }
}

#[derive(Debug)]
pub struct NoopParameterMetaData {
    _private: (),
}

singleton!(PARAMETER_METADATA: NoopParameterMetaData = NoopParameterMetaData { _private: () });

impl NoopParameterMetaData {
    pub fn shared() -> Arc<NoopParameterMetaData> {
        Arc::clone(&PARAMETER_METADATA)
    }
}

impl Handle for NoopParameterMetaData {
    fn interface(&self) -> Interface {
        Interface::ParameterMetaData
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        ApiObject::ParameterMetaData(self)
    }
}

impl ParameterMetaData for NoopParameterMetaData {
    fn parameter_count(&self) -> Result<usize> {
        Ok(0)
    }

    fn parameter_type_name(&self, _index: usize) -> Result<String> {
        Ok(SqlValue::Null.type_name().to_string())
    }
}

/// Reports the mock driver's packaged version.
#[derive(Debug)]
pub struct NoopDatabaseMetaData {
    version: Version,
}

singleton!(DATABASE_METADATA: NoopDatabaseMetaData = NoopDatabaseMetaData {
    version: Version::packaged()
});

impl NoopDatabaseMetaData {
    pub fn shared() -> Arc<NoopDatabaseMetaData> {
        Arc::clone(&DATABASE_METADATA)
    }
}

impl Handle for NoopDatabaseMetaData {
    fn interface(&self) -> Interface {
        Interface::DatabaseMetaData
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        ApiObject::DatabaseMetaData(self)
    }
}

impl DatabaseMetaData for NoopDatabaseMetaData {
    fn product_name(&self) -> Result<String> {
        Ok(NOOP_PRODUCT.to_string())
    }

    fn product_version(&self) -> Result<String> {
        Ok(self.version.to_string())
    }

    fn driver_name(&self) -> Result<String> {
        Ok(NOOP_PRODUCT.to_string())
    }

    fn driver_version(&self) -> Result<String> {
        Ok(self.version.to_string())
    }

    fn url(&self) -> Result<String> {
        Ok(NOOP_URL.to_string())
    }

    fn user_name(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn supports_savepoints(&self) -> Result<bool> {
        Ok(true)
    }

    fn tables(&self, _pattern: Option<&str>) -> Result<Arc<dyn ResultSet>> {
        Ok(NoopResultSet::shared())
    }

    fn connection(&self) -> Result<Arc<dyn Connection>> {
        Ok(NoopConnection::shared())
    }
}

// ─── Large objects ──────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct NoopBlob {
    _private: (),
}

singleton!(BLOB: NoopBlob = NoopBlob { _private: () });

impl NoopBlob {
    pub fn shared() -> Arc<NoopBlob> {
        Arc::clone(&BLOB)
    }
}

impl Handle for NoopBlob {
    fn interface(&self) -> Interface {
        Interface::Blob
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        ApiObject::Blob(self)
    }
}

impl Blob for NoopBlob {
    fn length(&self) -> Result<i64> {
        Ok(0)
    }

    fn bytes(&self, _position: i64, _length: usize) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn set_bytes(&self, _position: i64, bytes: &[u8]) -> Result<usize> {
        Ok(bytes.len())
    }

    fn truncate(&self, _length: i64) -> Result<()> {
        Ok(())
    }

    fn free(&self) -> Result<()> {
        Ok(())
    }
}

/// Character large object; `national` selects [`NClob`] over [`Clob`].
#[derive(Debug)]
pub struct NoopClob {
    national: bool,
}

singleton!(CLOB: NoopClob = NoopClob { national: false });
singleton!(NCLOB: NoopClob = NoopClob { national: true });

impl NoopClob {
    pub fn shared(national: bool) -> Arc<NoopClob> {
        if national {
            Arc::clone(&NCLOB)
        } else {
            Arc::clone(&CLOB)
        }
    }
}

impl Handle for NoopClob {
    fn interface(&self) -> Interface {
        if self.national {
            Interface::NClob
        } else {
            Interface::Clob
        }
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        if self.national {
            ApiObject::NClob(self)
        } else {
            ApiObject::Clob(self)
        }
    }
}

impl Clob for NoopClob {
    fn length(&self) -> Result<i64> {
        Ok(0)
    }

    fn substring(&self, _position: i64, _length: usize) -> Result<String> {
        Ok(String::new())
    }

    fn set_string(&self, _position: i64, text: &str) -> Result<usize> {
        Ok(text.chars().count())
    }

    fn truncate(&self, _length: i64) -> Result<()> {
        Ok(())
    }

    fn free(&self) -> Result<()> {
        Ok(())
    }
}

impl NClob for NoopClob {}
