//! Large object interfaces. Positions are 1-based.

use crate::errors::Result;
use crate::handle::Handle;

pub trait Blob: Handle {
    fn length(&self) -> Result<i64>;
    fn bytes(&self, position: i64, length: usize) -> Result<Vec<u8>>;
    fn set_bytes(&self, position: i64, bytes: &[u8]) -> Result<usize>;
    fn truncate(&self, length: i64) -> Result<()>;
    fn free(&self) -> Result<()>;
}

pub trait Clob: Handle {
    fn length(&self) -> Result<i64>;
    fn substring(&self, position: i64, length: usize) -> Result<String>;
    fn set_string(&self, position: i64, text: &str) -> Result<usize>;
    fn truncate(&self, length: i64) -> Result<()>;
    fn free(&self) -> Result<()>;
}

/// National character set variant of [`Clob`].
pub trait NClob: Clob {}
