//! Metadata proxies.

use std::sync::Arc;

use connmock_api::{
    Connection, DatabaseMetaData, Handle, ParameterMetaData, Result, ResultSet, ResultSetMetaData,
};

use super::Wrap;

impl<S> DatabaseMetaData for Wrap<S>
where
    S: ?Sized + DatabaseMetaData,
    Wrap<S>: Handle,
{
    fn product_name(&self) -> Result<String> {
        self.invoke("product_name", format_args!(""), || self.delegate.product_name())
    }

    fn product_version(&self) -> Result<String> {
        self.invoke("product_version", format_args!(""), || self.delegate.product_version())
    }

    fn driver_name(&self) -> Result<String> {
        self.invoke("driver_name", format_args!(""), || self.delegate.driver_name())
    }

    fn driver_version(&self) -> Result<String> {
        self.invoke("driver_version", format_args!(""), || self.delegate.driver_version())
    }

    fn url(&self) -> Result<String> {
        self.invoke("url", format_args!(""), || self.delegate.url())
    }

    fn user_name(&self) -> Result<Option<String>> {
        self.invoke("user_name", format_args!(""), || self.delegate.user_name())
    }

    fn supports_savepoints(&self) -> Result<bool> {
        self.invoke("supports_savepoints", format_args!(""), || {
            self.delegate.supports_savepoints()
        })
    }

    fn tables(&self, pattern: Option<&str>) -> Result<Arc<dyn ResultSet>> {
        self.invoke("tables", format_args!("{pattern:?}"), || self.delegate.tables(pattern))
    }

    fn connection(&self) -> Result<Arc<dyn Connection>> {
        self.invoke("connection", format_args!(""), || self.delegate.connection())
    }
}

impl<S> ResultSetMetaData for Wrap<S>
where
    S: ?Sized + ResultSetMetaData,
    Wrap<S>: Handle,
{
    fn column_count(&self) -> Result<usize> {
        self.invoke("column_count", format_args!(""), || self.delegate.column_count())
    }

    fn column_name(&self, column: usize) -> Result<String> {
        self.invoke("column_name", format_args!("{column}"), || self.delegate.column_name(column))
    }

    fn column_type_name(&self, column: usize) -> Result<String> {
        self.invoke("column_type_name", format_args!("{column}"), || {
            self.delegate.column_type_name(column)
        })
    }

    fn is_nullable(&self, column: usize) -> Result<bool> {
        self.invoke("is_nullable", format_args!("{column}"), || self.delegate.is_nullable(column))
    }
}

impl<S> ParameterMetaData for Wrap<S>
where
    S: ?Sized + ParameterMetaData,
    Wrap<S>: Handle,
{
    fn parameter_count(&self) -> Result<usize> {
        self.invoke("parameter_count", format_args!(""), || self.delegate.parameter_count())
    }

    fn parameter_type_name(&self, index: usize) -> Result<String> {
        self.invoke("parameter_type_name", format_args!("{index}"), || {
            self.delegate.parameter_type_name(index)
        })
    }
}
