//! Metadata interfaces.

use std::sync::Arc;

use crate::errors::Result;
use crate::handle::Handle;
use crate::traits::connection::Connection;
use crate::traits::result_set::ResultSet;

pub trait DatabaseMetaData: Handle {
    fn product_name(&self) -> Result<String>;
    fn product_version(&self) -> Result<String>;
    fn driver_name(&self) -> Result<String>;
    fn driver_version(&self) -> Result<String>;
    fn url(&self) -> Result<String>;
    fn user_name(&self) -> Result<Option<String>>;
    fn supports_savepoints(&self) -> Result<bool>;
    /// Tables whose name matches `pattern` (SQL `LIKE` syntax), all when `None`.
    fn tables(&self, pattern: Option<&str>) -> Result<Arc<dyn ResultSet>>;
    fn connection(&self) -> Result<Arc<dyn Connection>>;
}

pub trait ResultSetMetaData: Handle {
    fn column_count(&self) -> Result<usize>;
    fn column_name(&self, column: usize) -> Result<String>;
    fn column_type_name(&self, column: usize) -> Result<String>;
    fn is_nullable(&self, column: usize) -> Result<bool>;
}

pub trait ParameterMetaData: Handle {
    fn parameter_count(&self) -> Result<usize>;
    fn parameter_type_name(&self, index: usize) -> Result<String>;
}
