//! Database, result and parameter metadata.

use std::sync::Arc;

use connmock_api::{
    ApiObject, Connection, DatabaseMetaData, Handle, Interface, ParameterMetaData, Result,
    ResultSet, ResultSetMetaData,
};
use rusqlite::types::Value;

use crate::connection::SqliteConnection;
use crate::errors::check_index;
use crate::result_set::SqliteResultSet;

const TABLES_SQL: &str = "SELECT name AS TABLE_NAME, upper(type) AS TABLE_TYPE \
     FROM sqlite_master \
     WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%' AND name LIKE ?1 \
     ORDER BY name";

#[derive(Debug)]
pub struct SqliteDatabaseMetaData {
    connection: Arc<SqliteConnection>,
}

impl SqliteDatabaseMetaData {
    pub(crate) fn new(connection: Arc<SqliteConnection>) -> Self {
        Self { connection }
    }
}

impl Handle for SqliteDatabaseMetaData {
    fn interface(&self) -> Interface {
        Interface::DatabaseMetaData
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        ApiObject::DatabaseMetaData(self)
    }
}

impl DatabaseMetaData for SqliteDatabaseMetaData {
    fn product_name(&self) -> Result<String> {
        Ok("SQLite".to_string())
    }

    fn product_version(&self) -> Result<String> {
        Ok(rusqlite::version().to_string())
    }

    fn driver_name(&self) -> Result<String> {
        Ok(crate::DRIVER_NAME.to_string())
    }

    fn driver_version(&self) -> Result<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }

    fn url(&self) -> Result<String> {
        Ok(self.connection.url().to_string())
    }

    fn user_name(&self) -> Result<Option<String>> {
        Ok(self.connection.user().map(str::to_string))
    }

    fn supports_savepoints(&self) -> Result<bool> {
        Ok(false)
    }

    /// Tables and views whose name matches the `LIKE` pattern (all when
    /// `None`).
    fn tables(&self, pattern: Option<&str>) -> Result<Arc<dyn ResultSet>> {
        let pattern = Value::Text(pattern.unwrap_or("%").to_string());
        let data = self.connection.query(TABLES_SQL, &[pattern], 0)?;
        Ok(SqliteResultSet::new(data, None))
    }

    fn connection(&self) -> Result<Arc<dyn Connection>> {
        Ok(self.connection.clone())
    }
}

/// Column names and type names of a result.
#[derive(Debug, Clone)]
pub struct SqliteResultSetMetaData {
    columns: Vec<(String, String)>,
}

impl SqliteResultSetMetaData {
    pub(crate) fn new(columns: Vec<(String, String)>) -> Self {
        Self { columns }
    }

    /// 1-based position of `label`, ignoring ASCII case.
    pub(crate) fn position(&self, label: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(label))
            .map(|i| i + 1)
    }

    fn column(&self, column: usize) -> Result<&(String, String)> {
        let index = check_index(column, self.columns.len())?;
        Ok(&self.columns[index])
    }
}

impl Handle for SqliteResultSetMetaData {
    fn interface(&self) -> Interface {
        Interface::ResultSetMetaData
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        ApiObject::ResultSetMetaData(self)
    }
}

impl ResultSetMetaData for SqliteResultSetMetaData {
    fn column_count(&self) -> Result<usize> {
        Ok(self.columns.len())
    }

    fn column_name(&self, column: usize) -> Result<String> {
        Ok(self.column(column)?.0.clone())
    }

    fn column_type_name(&self, column: usize) -> Result<String> {
        Ok(self.column(column)?.1.clone())
    }

    /// SQLite does not report nullability for result columns.
    fn is_nullable(&self, column: usize) -> Result<bool> {
        self.column(column).map(|_| true)
    }
}

/// Type names of the values currently bound to a prepared statement.
#[derive(Debug, Clone)]
pub struct SqliteParameterMetaData {
    types: Vec<&'static str>,
}

impl SqliteParameterMetaData {
    pub(crate) fn new(types: Vec<&'static str>) -> Self {
        Self { types }
    }
}

impl Handle for SqliteParameterMetaData {
    fn interface(&self) -> Interface {
        Interface::ParameterMetaData
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        ApiObject::ParameterMetaData(self)
    }
}

impl ParameterMetaData for SqliteParameterMetaData {
    fn parameter_count(&self) -> Result<usize> {
        Ok(self.types.len())
    }

    fn parameter_type_name(&self, index: usize) -> Result<String> {
        let at = check_index(index, self.types.len())?;
        Ok(self.types[at].to_string())
    }
}
