//! Result set interface.

use std::sync::Arc;

use crate::errors::Result;
use crate::handle::Handle;
use crate::traits::metadata::ResultSetMetaData;
use crate::traits::statement::Statement;
use crate::value::SqlValue;

/// Forward-only cursor over the rows of a query.
pub trait ResultSet: Handle {
    /// Advances to the next row; false once the rows are exhausted.
    fn next(&self) -> Result<bool>;

    fn get_int(&self, column: usize) -> Result<i32>;
    fn get_long(&self, column: usize) -> Result<i64>;
    fn get_double(&self, column: usize) -> Result<f64>;
    fn get_string(&self, column: usize) -> Result<Option<String>>;
    fn get_bytes(&self, column: usize) -> Result<Option<Vec<u8>>>;
    fn get_value(&self, column: usize) -> Result<SqlValue>;
    /// True when the last column read was SQL NULL.
    fn was_null(&self) -> Result<bool>;

    fn find_column(&self, label: &str) -> Result<usize>;
    fn metadata(&self) -> Result<Arc<dyn ResultSetMetaData>>;
    fn statement(&self) -> Result<Option<Arc<dyn Statement>>>;

    fn close(&self) -> Result<()>;
    fn is_closed(&self) -> Result<bool>;
}
