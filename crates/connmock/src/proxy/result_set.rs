//! Result set proxy.

use std::sync::Arc;

use connmock_api::{Handle, Result, ResultSet, ResultSetMetaData, SqlValue, Statement};

use super::Wrap;

impl<S> ResultSet for Wrap<S>
where
    S: ?Sized + ResultSet,
    Wrap<S>: Handle,
{
    fn next(&self) -> Result<bool> {
        self.invoke("next", format_args!(""), || self.delegate.next())
    }

    fn get_int(&self, column: usize) -> Result<i32> {
        self.invoke("get_int", format_args!("{column}"), || self.delegate.get_int(column))
    }

    fn get_long(&self, column: usize) -> Result<i64> {
        self.invoke("get_long", format_args!("{column}"), || self.delegate.get_long(column))
    }

    fn get_double(&self, column: usize) -> Result<f64> {
        self.invoke("get_double", format_args!("{column}"), || self.delegate.get_double(column))
    }

    fn get_string(&self, column: usize) -> Result<Option<String>> {
        self.invoke("get_string", format_args!("{column}"), || self.delegate.get_string(column))
    }

    fn get_bytes(&self, column: usize) -> Result<Option<Vec<u8>>> {
        self.invoke("get_bytes", format_args!("{column}"), || self.delegate.get_bytes(column))
    }

    fn get_value(&self, column: usize) -> Result<SqlValue> {
        self.invoke("get_value", format_args!("{column}"), || self.delegate.get_value(column))
    }

    fn was_null(&self) -> Result<bool> {
        self.invoke("was_null", format_args!(""), || self.delegate.was_null())
    }

    fn find_column(&self, label: &str) -> Result<usize> {
        self.invoke("find_column", format_args!("{label}"), || self.delegate.find_column(label))
    }

    fn metadata(&self) -> Result<Arc<dyn ResultSetMetaData>> {
        self.invoke("metadata", format_args!(""), || self.delegate.metadata())
    }

    fn statement(&self) -> Result<Option<Arc<dyn Statement>>> {
        self.invoke("statement", format_args!(""), || self.delegate.statement())
    }

    fn close(&self) -> Result<()> {
        self.invoke_void("close", format_args!(""), || self.delegate.close())
    }

    fn is_closed(&self) -> Result<bool> {
        self.invoke("is_closed", format_args!(""), || self.delegate.is_closed())
    }
}
