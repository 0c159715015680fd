//! Plain and prepared statements over a `SqliteConnection`.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use connmock_api::{
    ApiObject, Connection, Handle, Interface, ParameterMetaData, PreparedStatement, Result,
    ResultSet, ResultSetMetaData, SqlValue, Statement,
};
use rusqlite::types::Value;
use tracing::trace;

use crate::connection::SqliteConnection;
use crate::errors::{check_index, BackendError};
use crate::metadata::{SqliteParameterMetaData, SqliteResultSetMetaData};
use crate::result_set::{Materialized, SqliteResultSet};
use crate::value::{from_sqlite, to_sqlite};

/// SQL fixed at preparation time.
#[derive(Debug)]
struct Prepared {
    sql: String,
    parameter_count: usize,
}

pub struct SqliteStatement {
    connection: Arc<SqliteConnection>,
    prepared: Option<Prepared>,
    params: Mutex<Vec<Value>>,
    batch: Mutex<Vec<String>>,
    current: Mutex<Option<Arc<SqliteResultSet>>>,
    update_count: AtomicI64,
    max_rows: AtomicI32,
    query_timeout: AtomicI32,
    closed: AtomicBool,
    this: Weak<SqliteStatement>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SqliteStatement {
    pub(crate) fn plain(connection: Arc<SqliteConnection>) -> Arc<Self> {
        Self::build(connection, None)
    }

    /// Compiles `sql` once to validate it and count its parameters.
    pub(crate) fn prepared(connection: Arc<SqliteConnection>, sql: &str) -> Result<Arc<Self>> {
        let parameter_count = connection.parameter_count(sql)?;
        let prepared = Prepared {
            sql: sql.to_string(),
            parameter_count,
        };
        Ok(Self::build(connection, Some(prepared)))
    }

    fn build(connection: Arc<SqliteConnection>, prepared: Option<Prepared>) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            connection,
            prepared,
            params: Mutex::new(Vec::new()),
            batch: Mutex::new(Vec::new()),
            current: Mutex::new(None),
            update_count: AtomicI64::new(-1),
            max_rows: AtomicI32::new(0),
            query_timeout: AtomicI32::new(0),
            closed: AtomicBool::new(false),
            this: this.clone(),
        })
    }

    fn check_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(BackendError::Closed { object: "statement" }.into());
        }
        Ok(())
    }

    fn prepared_sql(&self) -> Result<&Prepared> {
        self.prepared
            .as_ref()
            .ok_or_else(|| BackendError::NotSupported { feature: "parameters on a plain statement" }.into())
    }

    fn max_rows_limit(&self) -> usize {
        usize::try_from(self.max_rows.load(Ordering::Acquire)).unwrap_or(0)
    }

    fn query(&self, sql: &str, params: &[Value]) -> Result<Arc<SqliteResultSet>> {
        self.check_open()?;
        trace!(sql, params = params.len(), "sqlite query");
        let data: Materialized = self.connection.query(sql, params, self.max_rows_limit())?;
        let results = SqliteResultSet::new(data, Some(self.this.clone()));
        *lock(&self.current) = Some(Arc::clone(&results));
        self.update_count.store(-1, Ordering::Release);
        Ok(results)
    }

    fn update(&self, sql: &str, params: &[Value]) -> Result<i64> {
        self.check_open()?;
        trace!(sql, params = params.len(), "sqlite update");
        let count = self.connection.update(sql, params)?;
        *lock(&self.current) = None;
        self.update_count.store(count, Ordering::Release);
        Ok(count)
    }

    /// Runs `sql` as a query when it returns columns, else as an update.
    fn run(&self, sql: &str, params: &[Value]) -> Result<bool> {
        if self.connection.columns(sql)?.is_empty() {
            self.update(sql, params)?;
            Ok(false)
        } else {
            self.query(sql, params)?;
            Ok(true)
        }
    }

    /// Bound parameters, padded with NULL up to the parameter count.
    fn bound(&self) -> Result<Vec<Value>> {
        let count = self.prepared_sql()?.parameter_count;
        let mut params = lock(&self.params).clone();
        params.resize(count, Value::Null);
        Ok(params)
    }

    fn bind(&self, index: usize, value: Value) -> Result<()> {
        self.check_open()?;
        let at = check_index(index, self.prepared_sql()?.parameter_count)?;
        let mut params = lock(&self.params);
        if params.len() <= at {
            params.resize(at + 1, Value::Null);
        }
        params[at] = value;
        Ok(())
    }
}

impl fmt::Debug for SqliteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStatement")
            .field("sql", &self.prepared.as_ref().map(|p| p.sql.as_str()))
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish()
    }
}

impl Handle for SqliteStatement {
    fn interface(&self) -> Interface {
        if self.prepared.is_some() {
            Interface::PreparedStatement
        } else {
            Interface::Statement
        }
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        if self.prepared.is_some() {
            ApiObject::PreparedStatement(self)
        } else {
            ApiObject::Statement(self)
        }
    }
}

impl Statement for SqliteStatement {
    fn execute_query(&self, sql: &str) -> Result<Arc<dyn ResultSet>> {
        Ok(self.query(sql, &[])?)
    }

    fn execute_update(&self, sql: &str) -> Result<i64> {
        self.update(sql, &[])
    }

    fn execute(&self, sql: &str) -> Result<bool> {
        self.run(sql, &[])
    }

    fn result_set(&self) -> Result<Option<Arc<dyn ResultSet>>> {
        let current = lock(&self.current).clone();
        Ok(current.map(|rs| rs as Arc<dyn ResultSet>))
    }

    fn update_count(&self) -> Result<i64> {
        Ok(self.update_count.load(Ordering::Acquire))
    }

    fn connection(&self) -> Result<Arc<dyn Connection>> {
        Ok(self.connection.clone())
    }

    fn set_max_rows(&self, max: i32) -> Result<()> {
        self.max_rows.store(max.max(0), Ordering::Release);
        Ok(())
    }

    fn max_rows(&self) -> Result<i32> {
        Ok(self.max_rows.load(Ordering::Acquire))
    }

    /// Recorded only; use `cancel` to stop a running query.
    fn set_query_timeout(&self, secs: i32) -> Result<()> {
        self.query_timeout.store(secs.max(0), Ordering::Release);
        Ok(())
    }

    fn query_timeout(&self) -> Result<i32> {
        Ok(self.query_timeout.load(Ordering::Acquire))
    }

    fn add_batch(&self, sql: &str) -> Result<()> {
        self.check_open()?;
        lock(&self.batch).push(sql.to_string());
        Ok(())
    }

    fn clear_batch(&self) -> Result<()> {
        lock(&self.batch).clear();
        Ok(())
    }

    /// Runs the queued statements in order and empties the queue. Stops at
    /// the first failure.
    fn execute_batch(&self) -> Result<Vec<i64>> {
        let queued = std::mem::take(&mut *lock(&self.batch));
        queued.iter().map(|sql| self.update(sql, &[])).collect()
    }

    fn cancel(&self) -> Result<()> {
        self.connection.interrupt();
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        *lock(&self.current) = None;
        Ok(())
    }

    fn is_closed(&self) -> Result<bool> {
        Ok(self.closed.load(Ordering::Acquire))
    }
}

impl PreparedStatement for SqliteStatement {
    fn set_null(&self, index: usize) -> Result<()> {
        self.bind(index, Value::Null)
    }

    fn set_int(&self, index: usize, value: i32) -> Result<()> {
        self.bind(index, Value::Integer(i64::from(value)))
    }

    fn set_long(&self, index: usize, value: i64) -> Result<()> {
        self.bind(index, Value::Integer(value))
    }

    fn set_double(&self, index: usize, value: f64) -> Result<()> {
        self.bind(index, Value::Real(value))
    }

    fn set_string(&self, index: usize, value: &str) -> Result<()> {
        self.bind(index, Value::Text(value.to_string()))
    }

    fn set_bytes(&self, index: usize, value: &[u8]) -> Result<()> {
        self.bind(index, Value::Blob(value.to_vec()))
    }

    fn set_value(&self, index: usize, value: SqlValue) -> Result<()> {
        self.bind(index, to_sqlite(value))
    }

    fn clear_parameters(&self) -> Result<()> {
        lock(&self.params).clear();
        Ok(())
    }

    fn execute_prepared_query(&self) -> Result<Arc<dyn ResultSet>> {
        let params = self.bound()?;
        Ok(self.query(&self.prepared_sql()?.sql, &params)?)
    }

    fn execute_prepared_update(&self) -> Result<i64> {
        let params = self.bound()?;
        self.update(&self.prepared_sql()?.sql, &params)
    }

    fn execute_prepared(&self) -> Result<bool> {
        let params = self.bound()?;
        self.run(&self.prepared_sql()?.sql, &params)
    }

    fn parameter_metadata(&self) -> Result<Arc<dyn ParameterMetaData>> {
        let types = self
            .bound()?
            .into_iter()
            .map(|value| from_sqlite(value).type_name())
            .collect();
        Ok(Arc::new(SqliteParameterMetaData::new(types)))
    }

    fn result_metadata(&self) -> Result<Option<Arc<dyn ResultSetMetaData>>> {
        let columns = self.connection.columns(&self.prepared_sql()?.sql)?;
        if columns.is_empty() {
            return Ok(None);
        }
        let described = columns
            .into_iter()
            .map(|c| {
                let type_name = c.decl_type.unwrap_or_else(|| SqlValue::Null.type_name().to_string());
                (c.name, type_name)
            })
            .collect();
        let metadata: Arc<dyn ResultSetMetaData> = Arc::new(SqliteResultSetMetaData::new(described));
        Ok(Some(metadata))
    }
}
