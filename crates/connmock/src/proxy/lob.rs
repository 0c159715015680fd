//! Blob, clob and nclob proxies.

use connmock_api::{Blob, Clob, Handle, NClob, Result};

use super::Wrap;

impl<S> Blob for Wrap<S>
where
    S: ?Sized + Blob,
    Wrap<S>: Handle,
{
    fn length(&self) -> Result<i64> {
        self.invoke("length", format_args!(""), || self.delegate.length())
    }

    fn bytes(&self, position: i64, length: usize) -> Result<Vec<u8>> {
        self.invoke("bytes", format_args!("{position},{length}"), || {
            self.delegate.bytes(position, length)
        })
    }

    fn set_bytes(&self, position: i64, bytes: &[u8]) -> Result<usize> {
        self.invoke("set_bytes", format_args!("{position},<{} bytes>", bytes.len()), || {
            self.delegate.set_bytes(position, bytes)
        })
    }

    fn truncate(&self, length: i64) -> Result<()> {
        self.invoke_void("truncate", format_args!("{length}"), || self.delegate.truncate(length))
    }

    fn free(&self) -> Result<()> {
        self.invoke_void("free", format_args!(""), || self.delegate.free())
    }
}

impl<S> Clob for Wrap<S>
where
    S: ?Sized + Clob,
    Wrap<S>: Handle,
{
    fn length(&self) -> Result<i64> {
        self.invoke("length", format_args!(""), || self.delegate.length())
    }

    fn substring(&self, position: i64, length: usize) -> Result<String> {
        self.invoke("substring", format_args!("{position},{length}"), || {
            self.delegate.substring(position, length)
        })
    }

    fn set_string(&self, position: i64, text: &str) -> Result<usize> {
        self.invoke("set_string", format_args!("{position},{text}"), || {
            self.delegate.set_string(position, text)
        })
    }

    fn truncate(&self, length: i64) -> Result<()> {
        self.invoke_void("truncate", format_args!("{length}"), || self.delegate.truncate(length))
    }

    fn free(&self) -> Result<()> {
        self.invoke_void("free", format_args!(""), || self.delegate.free())
    }
}

impl<S> NClob for Wrap<S>
where
    S: ?Sized + NClob,
    Wrap<S>: Clob,
{
}
