//! Column and parameter values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SqlError, STATE_INVALID_CAST};

/// A single SQL value, using SQLite's storage classes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum SqlValue {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "NULL",
            SqlValue::Integer(_) => "INTEGER",
            SqlValue::Real(_) => "REAL",
            SqlValue::Text(_) => "TEXT",
            SqlValue::Blob(_) => "BLOB",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Integer view. NULL reads as 0; text must parse.
    pub fn to_i64(&self) -> Result<i64> {
        match self {
            SqlValue::Null => Ok(0),
            SqlValue::Integer(i) => Ok(*i),
            SqlValue::Real(r) => Ok(*r as i64),
            SqlValue::Text(t) => t.trim().parse().map_err(|_| invalid_cast(self, "BIGINT")),
            SqlValue::Blob(_) => Err(invalid_cast(self, "BIGINT")),
        }
    }

    pub fn to_i32(&self) -> Result<i32> {
        let wide = self.to_i64()?;
        i32::try_from(wide).map_err(|_| invalid_cast(self, "INTEGER"))
    }

    pub fn to_f64(&self) -> Result<f64> {
        match self {
            SqlValue::Null => Ok(0.0),
            SqlValue::Integer(i) => Ok(*i as f64),
            SqlValue::Real(r) => Ok(*r),
            SqlValue::Text(t) => t.trim().parse().map_err(|_| invalid_cast(self, "DOUBLE")),
            SqlValue::Blob(_) => Err(invalid_cast(self, "DOUBLE")),
        }
    }

    /// Text view; NULL reads as `None`, blobs must be UTF-8.
    pub fn to_text(&self) -> Result<Option<String>> {
        match self {
            SqlValue::Null => Ok(None),
            SqlValue::Integer(i) => Ok(Some(i.to_string())),
            SqlValue::Real(r) => Ok(Some(r.to_string())),
            SqlValue::Text(t) => Ok(Some(t.clone())),
            SqlValue::Blob(b) => String::from_utf8(b.clone())
                .map(Some)
                .map_err(|_| invalid_cast(self, "VARCHAR")),
        }
    }

    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        match self {
            SqlValue::Null => None,
            SqlValue::Blob(b) => Some(b.clone()),
            SqlValue::Text(t) => Some(t.clone().into_bytes()),
            other => other.to_text().ok().flatten().map(String::into_bytes),
        }
    }
}

fn invalid_cast(value: &SqlValue, target: &str) -> crate::errors::Error {
    SqlError::with_state(
        format!("cannot read {} value as {target}", value.type_name()),
        STATE_INVALID_CAST,
    )
    .into()
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Integer(i) => write!(f, "{i}"),
            SqlValue::Real(r) => write!(f, "{r}"),
            SqlValue::Text(t) => write!(f, "'{t}'"),
            SqlValue::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Integer(value.into())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        SqlValue::Blob(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}
