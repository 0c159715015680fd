//! `SqliteConnection`: one rusqlite connection behind a mutex.
//!
//! The connection is the only owner of the rusqlite handle. Statements,
//! result sets and metadata reach SQLite through `with_conn` and the query
//! helpers below; nothing else locks the mutex.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use connmock_api::{
    ApiObject, Blob, CallableStatement, ClientInfoError, Clob, Connection, DatabaseMetaData,
    Handle, Interface, NClob, PreparedStatement, Result, Savepoint, Statement,
};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, InterruptHandle};
use tracing::debug;

use crate::errors::{not_supported, to_sql_error, BackendError};
use crate::metadata::SqliteDatabaseMetaData;
use crate::result_set::{ColumnInfo, Materialized};
use crate::statement::SqliteStatement;
use crate::value::from_sqlite;

pub struct SqliteConnection {
    conn: Mutex<Option<rusqlite::Connection>>,
    interrupt: InterruptHandle,
    url: String,
    user: Option<String>,
    auto_commit: AtomicBool,
    client_info: Mutex<BTreeMap<String, String>>,
    this: Weak<SqliteConnection>,
}

impl SqliteConnection {
    /// Opens the database file at `path`, creating it if needed.
    pub fn open(path: &Path, url: &str, user: Option<&str>) -> Result<Arc<Self>> {
        let conn = rusqlite::Connection::open(path).map_err(to_sql_error)?;
        debug!(path = %path.display(), "opened sqlite database");
        Ok(Self::from_rusqlite(conn, url, user))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory(url: &str, user: Option<&str>) -> Result<Arc<Self>> {
        let conn = rusqlite::Connection::open_in_memory().map_err(to_sql_error)?;
        debug!("opened in-memory sqlite database");
        Ok(Self::from_rusqlite(conn, url, user))
    }

    fn from_rusqlite(conn: rusqlite::Connection, url: &str, user: Option<&str>) -> Arc<Self> {
        let interrupt = conn.get_interrupt_handle();
        Arc::new_cyclic(|this| Self {
            conn: Mutex::new(Some(conn)),
            interrupt,
            url: url.to_string(),
            user: user.map(str::to_string),
            auto_commit: AtomicBool::new(true),
            client_info: Mutex::new(BTreeMap::new()),
            this: this.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub(crate) fn shared(&self) -> Result<Arc<SqliteConnection>> {
        self.this
            .upgrade()
            .ok_or_else(|| BackendError::Closed { object: "connection" }.into())
    }

    fn lock(&self) -> MutexGuard<'_, Option<rusqlite::Connection>> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the open rusqlite connection.
    pub(crate) fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&rusqlite::Connection) -> rusqlite::Result<T>,
    {
        let guard = self.lock();
        let conn = guard
            .as_ref()
            .ok_or(BackendError::Closed { object: "connection" })?;
        f(conn).map_err(to_sql_error)
    }

    /// Runs a query and materializes up to `max_rows` rows (0 = all).
    pub(crate) fn query(&self, sql: &str, params: &[Value], max_rows: usize) -> Result<Materialized> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let columns: Vec<ColumnInfo> = stmt.columns().iter().map(ColumnInfo::from).collect();
            let mut rows = stmt.query(params_from_iter(params))?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                if max_rows > 0 && out.len() == max_rows {
                    break;
                }
                let values = (0..columns.len())
                    .map(|i| row.get::<_, Value>(i).map(from_sqlite))
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                out.push(values);
            }
            Ok(Materialized::new(columns, out))
        })
    }

    /// Executes a statement that returns no rows; yields the changed-row count.
    pub(crate) fn update(&self, sql: &str, params: &[Value]) -> Result<i64> {
        self.with_conn(|conn| conn.execute(sql, params_from_iter(params)))
            .map(|changed| changed as i64)
    }

    /// Columns `sql` would return; empty for statements without results.
    pub(crate) fn columns(&self, sql: &str) -> Result<Vec<ColumnInfo>> {
        self.with_conn(|conn| {
            let stmt = conn.prepare(sql)?;
            let columns = stmt.columns().iter().map(ColumnInfo::from).collect();
            Ok(columns)
        })
    }

    pub(crate) fn parameter_count(&self, sql: &str) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.prepare(sql)?.parameter_count()))
    }

    /// Interrupts the query running on this connection, if any. Does not
    /// wait for the connection lock.
    pub(crate) fn interrupt(&self) {
        self.interrupt.interrupt();
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("url", &self.url)
            .field("closed", &self.conn.try_lock().map(|conn| conn.is_none()).ok())
            .finish()
    }
}

impl Handle for SqliteConnection {
    fn interface(&self) -> Interface {
        Interface::Connection
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        ApiObject::Connection(self)
    }
}

impl Connection for SqliteConnection {
    fn create_statement(&self) -> Result<Arc<dyn Statement>> {
        Ok(SqliteStatement::plain(self.shared()?))
    }

    fn prepare_statement(&self, sql: &str) -> Result<Arc<dyn PreparedStatement>> {
        Ok(SqliteStatement::prepared(self.shared()?, sql)?)
    }

    fn prepare_call(&self, _sql: &str) -> Result<Arc<dyn CallableStatement>> {
        not_supported("callable statements")
    }

    fn native_sql(&self, sql: &str) -> Result<String> {
        Ok(sql.to_string())
    }

    /// Leaving auto-commit opens a transaction; returning to it commits.
    fn set_auto_commit(&self, auto_commit: bool) -> Result<()> {
        let was = self.auto_commit.swap(auto_commit, Ordering::AcqRel);
        match (was, auto_commit) {
            (true, false) => self.with_conn(|conn| conn.execute_batch("BEGIN")),
            (false, true) => self.with_conn(|conn| conn.execute_batch("COMMIT")),
            _ => Ok(()),
        }
    }

    fn auto_commit(&self) -> Result<bool> {
        Ok(self.auto_commit.load(Ordering::Acquire))
    }

    fn commit(&self) -> Result<()> {
        if self.auto_commit.load(Ordering::Acquire) {
            return Ok(());
        }
        self.with_conn(|conn| conn.execute_batch("COMMIT; BEGIN"))
    }

    fn rollback(&self) -> Result<()> {
        if self.auto_commit.load(Ordering::Acquire) {
            return Ok(());
        }
        self.with_conn(|conn| conn.execute_batch("ROLLBACK; BEGIN"))
    }

    fn set_savepoint(&self, _name: Option<&str>) -> Result<Arc<dyn Savepoint>> {
        not_supported("savepoints")
    }

    fn metadata(&self) -> Result<Arc<dyn DatabaseMetaData>> {
        Ok(Arc::new(SqliteDatabaseMetaData::new(self.shared()?)))
    }

    fn set_read_only(&self, read_only: bool) -> Result<()> {
        self.with_conn(|conn| conn.pragma_update(None, "query_only", read_only))
    }

    fn is_read_only(&self) -> Result<bool> {
        self.with_conn(|conn| conn.pragma_query_value(None, "query_only", |row| row.get(0)))
    }

    fn set_client_info(&self, name: &str, value: &str) -> Result<(), ClientInfoError> {
        if self.lock().is_none() {
            return Err(ClientInfoError::new("connection is closed"));
        }
        self.client_info
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn client_info(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .client_info
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned())
    }

    fn is_valid(&self, _timeout_secs: i32) -> Result<bool> {
        Ok(self
            .with_conn(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
            .is_ok())
    }

    fn create_blob(&self) -> Result<Arc<dyn Blob>> {
        not_supported("blobs")
    }

    fn create_clob(&self) -> Result<Arc<dyn Clob>> {
        not_supported("clobs")
    }

    fn create_nclob(&self) -> Result<Arc<dyn NClob>> {
        not_supported("nclobs")
    }

    fn close(&self) -> Result<()> {
        let Some(conn) = self.lock().take() else {
            return Ok(());
        };
        debug!(url = %self.url, "closing sqlite connection");
        conn.close().map_err(|(_, e)| to_sql_error(e))
    }

    fn is_closed(&self) -> Result<bool> {
        Ok(self.lock().is_none())
    }
}
