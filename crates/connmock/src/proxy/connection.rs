//! Connection and savepoint proxies.

use std::sync::Arc;

use connmock_api::{
    Blob, CallableStatement, ClientInfoError, Clob, Connection, DatabaseMetaData, Handle, NClob,
    PreparedStatement, Result, Savepoint, Statement,
};

use super::Wrap;

impl<S> Connection for Wrap<S>
where
    S: ?Sized + Connection,
    Wrap<S>: Handle,
{
    fn create_statement(&self) -> Result<Arc<dyn Statement>> {
        self.invoke("create_statement", format_args!(""), || self.delegate.create_statement())
    }

    fn prepare_statement(&self, sql: &str) -> Result<Arc<dyn PreparedStatement>> {
        self.invoke("prepare_statement", format_args!("{sql}"), || {
            self.delegate.prepare_statement(sql)
        })
    }

    fn prepare_call(&self, sql: &str) -> Result<Arc<dyn CallableStatement>> {
        self.invoke("prepare_call", format_args!("{sql}"), || self.delegate.prepare_call(sql))
    }

    fn native_sql(&self, sql: &str) -> Result<String> {
        self.invoke("native_sql", format_args!("{sql}"), || self.delegate.native_sql(sql))
    }

    fn set_auto_commit(&self, auto_commit: bool) -> Result<()> {
        self.invoke_void("set_auto_commit", format_args!("{auto_commit}"), || {
            self.delegate.set_auto_commit(auto_commit)
        })
    }

    fn auto_commit(&self) -> Result<bool> {
        self.invoke("auto_commit", format_args!(""), || self.delegate.auto_commit())
    }

    fn commit(&self) -> Result<()> {
        self.invoke_void("commit", format_args!(""), || self.delegate.commit())
    }

    fn rollback(&self) -> Result<()> {
        self.invoke_void("rollback", format_args!(""), || self.delegate.rollback())
    }

    fn set_savepoint(&self, name: Option<&str>) -> Result<Arc<dyn Savepoint>> {
        self.invoke("set_savepoint", format_args!("{name:?}"), || {
            self.delegate.set_savepoint(name)
        })
    }

    fn metadata(&self) -> Result<Arc<dyn DatabaseMetaData>> {
        self.invoke("metadata", format_args!(""), || self.delegate.metadata())
    }

    fn set_read_only(&self, read_only: bool) -> Result<()> {
        self.invoke_void("set_read_only", format_args!("{read_only}"), || {
            self.delegate.set_read_only(read_only)
        })
    }

    fn is_read_only(&self) -> Result<bool> {
        self.invoke("is_read_only", format_args!(""), || self.delegate.is_read_only())
    }

    fn set_client_info(&self, name: &str, value: &str) -> Result<(), ClientInfoError> {
        self.invoke_narrow("set_client_info", format_args!("{name},{value}"), || {
            self.delegate.set_client_info(name, value)
        })
    }

    fn client_info(&self, name: &str) -> Result<Option<String>> {
        self.invoke("client_info", format_args!("{name}"), || self.delegate.client_info(name))
    }

    fn is_valid(&self, timeout_secs: i32) -> Result<bool> {
        self.invoke("is_valid", format_args!("{timeout_secs}"), || {
            self.delegate.is_valid(timeout_secs)
        })
    }

    fn create_blob(&self) -> Result<Arc<dyn Blob>> {
        self.invoke("create_blob", format_args!(""), || self.delegate.create_blob())
    }

    fn create_clob(&self) -> Result<Arc<dyn Clob>> {
        self.invoke("create_clob", format_args!(""), || self.delegate.create_clob())
    }

    fn create_nclob(&self) -> Result<Arc<dyn NClob>> {
        self.invoke("create_nclob", format_args!(""), || self.delegate.create_nclob())
    }

    fn close(&self) -> Result<()> {
        self.invoke_void("close", format_args!(""), || self.delegate.close())
    }

    fn is_closed(&self) -> Result<bool> {
        self.invoke("is_closed", format_args!(""), || self.delegate.is_closed())
    }
}

impl<S> Savepoint for Wrap<S>
where
    S: ?Sized + Savepoint,
    Wrap<S>: Handle,
{
    fn id(&self) -> Result<i32> {
        self.invoke("id", format_args!(""), || self.delegate.id())
    }

    fn name(&self) -> Result<String> {
        self.invoke("name", format_args!(""), || self.delegate.name())
    }
}
