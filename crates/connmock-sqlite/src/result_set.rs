//! Materialized result sets.
//!
//! Rows are read eagerly when the query runs, so a result set never holds
//! the connection lock and stays readable after its statement moves on.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use connmock_api::{
    ApiObject, Handle, Interface, Result, ResultSet, ResultSetMetaData, SqlValue, Statement,
};

use crate::errors::{check_index, BackendError};
use crate::metadata::SqliteResultSetMetaData;
use crate::statement::SqliteStatement;

/// Name and declared type of a result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnInfo {
    pub(crate) name: String,
    pub(crate) decl_type: Option<String>,
}

impl From<&rusqlite::Column<'_>> for ColumnInfo {
    fn from(column: &rusqlite::Column<'_>) -> Self {
        Self {
            name: column.name().to_string(),
            decl_type: column.decl_type().map(str::to_string),
        }
    }
}

/// Rows read from SQLite together with their column descriptions.
#[derive(Debug, Clone)]
pub(crate) struct Materialized {
    pub(crate) metadata: SqliteResultSetMetaData,
    pub(crate) rows: Vec<Vec<SqlValue>>,
}

impl Materialized {
    /// Columns without a declared type take the type of their first
    /// non-null value.
    pub(crate) fn new(columns: Vec<ColumnInfo>, rows: Vec<Vec<SqlValue>>) -> Self {
        let described = columns
            .into_iter()
            .enumerate()
            .map(|(i, column)| {
                let type_name = column.decl_type.unwrap_or_else(|| {
                    rows.iter()
                        .filter_map(|row| row.get(i))
                        .find(|value| !value.is_null())
                        .map_or(SqlValue::Null.type_name(), SqlValue::type_name)
                        .to_string()
                });
                (column.name, type_name)
            })
            .collect();
        Self {
            metadata: SqliteResultSetMetaData::new(described),
            rows,
        }
    }
}

#[derive(Debug)]
pub struct SqliteResultSet {
    metadata: Arc<SqliteResultSetMetaData>,
    rows: Vec<Vec<SqlValue>>,
    /// 0 before the first row, `n` on row `n`, `rows.len() + 1` after the last.
    cursor: AtomicUsize,
    was_null: AtomicBool,
    closed: AtomicBool,
    statement: Option<Weak<SqliteStatement>>,
}

impl SqliteResultSet {
    pub(crate) fn new(data: Materialized, statement: Option<Weak<SqliteStatement>>) -> Arc<Self> {
        Arc::new(Self {
            metadata: Arc::new(data.metadata),
            rows: data.rows,
            cursor: AtomicUsize::new(0),
            was_null: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            statement,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn check_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(BackendError::Closed { object: "result set" }.into());
        }
        Ok(())
    }

    fn value(&self, column: usize) -> Result<SqlValue> {
        self.check_open()?;
        let at = self.cursor.load(Ordering::Acquire);
        let row = at
            .checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .ok_or(BackendError::NoCurrentRow)?;
        let index = check_index(column, row.len())?;
        let value = row[index].clone();
        self.was_null.store(value.is_null(), Ordering::Release);
        Ok(value)
    }
}

impl Handle for SqliteResultSet {
    fn interface(&self) -> Interface {
        Interface::ResultSet
    }

    fn into_object(self: Arc<Self>) -> ApiObject {
        ApiObject::ResultSet(self)
    }
}

impl ResultSet for SqliteResultSet {
    fn next(&self) -> Result<bool> {
        self.check_open()?;
        let end = self.rows.len() + 1;
        let previous = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| Some((n + 1).min(end)))
            .unwrap_or_else(|n| n);
        Ok(previous + 1 < end)
    }

    fn get_int(&self, column: usize) -> Result<i32> {
        self.value(column)?.to_i32()
    }

    fn get_long(&self, column: usize) -> Result<i64> {
        self.value(column)?.to_i64()
    }

    fn get_double(&self, column: usize) -> Result<f64> {
        self.value(column)?.to_f64()
    }

    fn get_string(&self, column: usize) -> Result<Option<String>> {
        self.value(column)?.to_text()
    }

    fn get_bytes(&self, column: usize) -> Result<Option<Vec<u8>>> {
        Ok(self.value(column)?.to_bytes())
    }

    fn get_value(&self, column: usize) -> Result<SqlValue> {
        self.value(column)
    }

    fn was_null(&self) -> Result<bool> {
        Ok(self.was_null.load(Ordering::Acquire))
    }

    fn find_column(&self, label: &str) -> Result<usize> {
        self.check_open()?;
        self.metadata
            .position(label)
            .ok_or_else(|| BackendError::UnknownColumn { label: label.to_string() }.into())
    }

    fn metadata(&self) -> Result<Arc<dyn ResultSetMetaData>> {
        Ok(self.metadata.clone())
    }

    fn statement(&self) -> Result<Option<Arc<dyn Statement>>> {
        let statement = self.statement.as_ref().and_then(Weak::upgrade);
        Ok(statement.map(|s| s as Arc<dyn Statement>))
    }

    fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }

    fn is_closed(&self) -> Result<bool> {
        Ok(self.closed.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rows() -> Arc<SqliteResultSet> {
        let columns = vec![
            ColumnInfo {
                name: "id".into(),
                decl_type: Some("INTEGER".into()),
            },
            ColumnInfo {
                name: "label".into(),
                decl_type: None,
            },
        ];
        let rows = vec![
            vec![SqlValue::Integer(1), SqlValue::Null],
            vec![SqlValue::Integer(2), SqlValue::Text("b".into())],
        ];
        SqliteResultSet::new(Materialized::new(columns, rows), None)
    }

    #[test]
    fn cursor_walks_rows_then_stops() {
        let rs = two_rows();
        assert!(rs.get_int(1).is_err());
        assert!(rs.next().unwrap());
        assert_eq!(rs.get_int(1).unwrap(), 1);
        assert!(rs.next().unwrap());
        assert_eq!(rs.get_string(2).unwrap().as_deref(), Some("b"));
        assert!(!rs.next().unwrap());
        assert!(!rs.next().unwrap());
        assert!(rs.get_int(1).is_err());
    }

    #[test]
    fn was_null_tracks_the_last_read() {
        let rs = two_rows();
        rs.next().unwrap();
        assert_eq!(rs.get_string(2).unwrap(), None);
        assert!(rs.was_null().unwrap());
        rs.get_long(1).unwrap();
        assert!(!rs.was_null().unwrap());
    }

    #[test]
    fn undeclared_types_come_from_values() {
        let rs = two_rows();
        let md = rs.metadata().unwrap();
        assert_eq!(md.column_type_name(1).unwrap(), "INTEGER");
        assert_eq!(md.column_type_name(2).unwrap(), "TEXT");
        assert_eq!(rs.find_column("LABEL").unwrap(), 2);
        assert!(rs.find_column("missing").is_err());
    }

    #[test]
    fn closed_result_sets_reject_reads() {
        let rs = two_rows();
        rs.close().unwrap();
        assert!(rs.is_closed().unwrap());
        assert!(rs.next().is_err());
    }
}
