//! Proxies for plain, prepared and callable statements.

use std::sync::Arc;

use connmock_api::{
    CallableStatement, Connection, Handle, ParameterMetaData, PreparedStatement, Result, ResultSet,
    ResultSetMetaData, SqlValue, Statement,
};

use super::Wrap;

impl<S> Statement for Wrap<S>
where
    S: ?Sized + Statement,
    Wrap<S>: Handle,
{
    fn execute_query(&self, sql: &str) -> Result<Arc<dyn ResultSet>> {
        self.invoke("execute_query", format_args!("{sql}"), || self.delegate.execute_query(sql))
    }

    fn execute_update(&self, sql: &str) -> Result<i64> {
        self.invoke("execute_update", format_args!("{sql}"), || {
            self.delegate.execute_update(sql)
        })
    }

    fn execute(&self, sql: &str) -> Result<bool> {
        self.invoke("execute", format_args!("{sql}"), || self.delegate.execute(sql))
    }

    fn result_set(&self) -> Result<Option<Arc<dyn ResultSet>>> {
        self.invoke("result_set", format_args!(""), || self.delegate.result_set())
    }

    fn update_count(&self) -> Result<i64> {
        self.invoke("update_count", format_args!(""), || self.delegate.update_count())
    }

    fn connection(&self) -> Result<Arc<dyn Connection>> {
        self.invoke("connection", format_args!(""), || self.delegate.connection())
    }

    fn set_max_rows(&self, max: i32) -> Result<()> {
        self.invoke_void("set_max_rows", format_args!("{max}"), || self.delegate.set_max_rows(max))
    }

    fn max_rows(&self) -> Result<i32> {
        self.invoke("max_rows", format_args!(""), || self.delegate.max_rows())
    }

    fn set_query_timeout(&self, secs: i32) -> Result<()> {
        self.invoke_void("set_query_timeout", format_args!("{secs}"), || {
            self.delegate.set_query_timeout(secs)
        })
    }

    fn query_timeout(&self) -> Result<i32> {
        self.invoke("query_timeout", format_args!(""), || self.delegate.query_timeout())
    }

    fn add_batch(&self, sql: &str) -> Result<()> {
        self.invoke_void("add_batch", format_args!("{sql}"), || self.delegate.add_batch(sql))
    }

    fn clear_batch(&self) -> Result<()> {
        self.invoke_void("clear_batch", format_args!(""), || self.delegate.clear_batch())
    }

    fn execute_batch(&self) -> Result<Vec<i64>> {
        self.invoke("execute_batch", format_args!(""), || self.delegate.execute_batch())
    }

    fn cancel(&self) -> Result<()> {
        self.invoke_void("cancel", format_args!(""), || self.delegate.cancel())
    }

    fn close(&self) -> Result<()> {
        self.invoke_void("close", format_args!(""), || self.delegate.close())
    }

    fn is_closed(&self) -> Result<bool> {
        self.invoke("is_closed", format_args!(""), || self.delegate.is_closed())
    }
}

impl<S> PreparedStatement for Wrap<S>
where
    S: ?Sized + PreparedStatement,
    Wrap<S>: Statement,
{
    fn set_null(&self, index: usize) -> Result<()> {
        self.invoke_void("set_null", format_args!("{index}"), || self.delegate.set_null(index))
    }

    fn set_int(&self, index: usize, value: i32) -> Result<()> {
        self.invoke_void("set_int", format_args!("{index},{value}"), || {
            self.delegate.set_int(index, value)
        })
    }

    fn set_long(&self, index: usize, value: i64) -> Result<()> {
        self.invoke_void("set_long", format_args!("{index},{value}"), || {
            self.delegate.set_long(index, value)
        })
    }

    fn set_double(&self, index: usize, value: f64) -> Result<()> {
        self.invoke_void("set_double", format_args!("{index},{value}"), || {
            self.delegate.set_double(index, value)
        })
    }

    fn set_string(&self, index: usize, value: &str) -> Result<()> {
        self.invoke_void("set_string", format_args!("{index},{value}"), || {
            self.delegate.set_string(index, value)
        })
    }

    fn set_bytes(&self, index: usize, value: &[u8]) -> Result<()> {
        self.invoke_void("set_bytes", format_args!("{index},<{} bytes>", value.len()), || {
            self.delegate.set_bytes(index, value)
        })
    }

    fn set_value(&self, index: usize, value: SqlValue) -> Result<()> {
        let shown = value.to_string();
        self.invoke_void("set_value", format_args!("{index},{shown}"), move || {
            self.delegate.set_value(index, value)
        })
    }

    fn clear_parameters(&self) -> Result<()> {
        self.invoke_void("clear_parameters", format_args!(""), || {
            self.delegate.clear_parameters()
        })
    }

    fn execute_prepared_query(&self) -> Result<Arc<dyn ResultSet>> {
        self.invoke("execute_prepared_query", format_args!(""), || {
            self.delegate.execute_prepared_query()
        })
    }

    fn execute_prepared_update(&self) -> Result<i64> {
        self.invoke("execute_prepared_update", format_args!(""), || {
            self.delegate.execute_prepared_update()
        })
    }

    fn execute_prepared(&self) -> Result<bool> {
        self.invoke("execute_prepared", format_args!(""), || self.delegate.execute_prepared())
    }

    fn parameter_metadata(&self) -> Result<Arc<dyn ParameterMetaData>> {
        self.invoke("parameter_metadata", format_args!(""), || {
            self.delegate.parameter_metadata()
        })
    }

    fn result_metadata(&self) -> Result<Option<Arc<dyn ResultSetMetaData>>> {
        self.invoke("result_metadata", format_args!(""), || self.delegate.result_metadata())
    }
}

impl<S> CallableStatement for Wrap<S>
where
    S: ?Sized + CallableStatement,
    Wrap<S>: PreparedStatement,
{
    fn register_out_parameter(&self, index: usize, sql_type: i32) -> Result<()> {
        self.invoke_void("register_out_parameter", format_args!("{index},{sql_type}"), || {
            self.delegate.register_out_parameter(index, sql_type)
        })
    }

    fn was_null(&self) -> Result<bool> {
        self.invoke("was_null", format_args!(""), || self.delegate.was_null())
    }

    fn get_int(&self, index: usize) -> Result<i32> {
        self.invoke("get_int", format_args!("{index}"), || self.delegate.get_int(index))
    }

    fn get_long(&self, index: usize) -> Result<i64> {
        self.invoke("get_long", format_args!("{index}"), || self.delegate.get_long(index))
    }

    fn get_double(&self, index: usize) -> Result<f64> {
        self.invoke("get_double", format_args!("{index}"), || self.delegate.get_double(index))
    }

    fn get_string(&self, index: usize) -> Result<Option<String>> {
        self.invoke("get_string", format_args!("{index}"), || self.delegate.get_string(index))
    }

    fn get_value(&self, index: usize) -> Result<SqlValue> {
        self.invoke("get_value", format_args!("{index}"), || self.delegate.get_value(index))
    }
}
