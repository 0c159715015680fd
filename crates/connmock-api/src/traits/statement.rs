//! Statement interfaces.

use std::sync::Arc;

use crate::errors::Result;
use crate::handle::Handle;
use crate::traits::connection::Connection;
use crate::traits::metadata::{ParameterMetaData, ResultSetMetaData};
use crate::traits::result_set::ResultSet;
use crate::value::SqlValue;

/// Executes SQL text.
pub trait Statement: Handle {
    fn execute_query(&self, sql: &str) -> Result<Arc<dyn ResultSet>>;
    fn execute_update(&self, sql: &str) -> Result<i64>;
    /// True when the statement produced a result set.
    fn execute(&self, sql: &str) -> Result<bool>;
    fn result_set(&self) -> Result<Option<Arc<dyn ResultSet>>>;
    fn update_count(&self) -> Result<i64>;
    fn connection(&self) -> Result<Arc<dyn Connection>>;

    fn set_max_rows(&self, max: i32) -> Result<()>;
    fn max_rows(&self) -> Result<i32>;
    fn set_query_timeout(&self, secs: i32) -> Result<()>;
    fn query_timeout(&self) -> Result<i32>;

    fn add_batch(&self, sql: &str) -> Result<()>;
    fn clear_batch(&self) -> Result<()>;
    fn execute_batch(&self) -> Result<Vec<i64>>;

    fn cancel(&self) -> Result<()>;
    fn close(&self) -> Result<()>;
    fn is_closed(&self) -> Result<bool>;
}

/// A statement compiled once, executed with positional parameters.
pub trait PreparedStatement: Statement {
    fn set_null(&self, index: usize) -> Result<()>;
    fn set_int(&self, index: usize, value: i32) -> Result<()>;
    fn set_long(&self, index: usize, value: i64) -> Result<()>;
    fn set_double(&self, index: usize, value: f64) -> Result<()>;
    fn set_string(&self, index: usize, value: &str) -> Result<()>;
    fn set_bytes(&self, index: usize, value: &[u8]) -> Result<()>;
    fn set_value(&self, index: usize, value: SqlValue) -> Result<()>;
    fn clear_parameters(&self) -> Result<()>;

    fn execute_prepared_query(&self) -> Result<Arc<dyn ResultSet>>;
    fn execute_prepared_update(&self) -> Result<i64>;
    fn execute_prepared(&self) -> Result<bool>;

    fn parameter_metadata(&self) -> Result<Arc<dyn ParameterMetaData>>;
    fn result_metadata(&self) -> Result<Option<Arc<dyn ResultSetMetaData>>>;
}

/// A prepared call to a stored procedure with output parameters.
pub trait CallableStatement: PreparedStatement {
    fn register_out_parameter(&self, index: usize, sql_type: i32) -> Result<()>;
    fn was_null(&self) -> Result<bool>;
    fn get_int(&self, index: usize) -> Result<i32>;
    fn get_long(&self, index: usize) -> Result<i64>;
    fn get_double(&self, index: usize) -> Result<f64>;
    fn get_string(&self, index: usize) -> Result<Option<String>>;
    fn get_value(&self, index: usize) -> Result<SqlValue>;
}
