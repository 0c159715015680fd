//! Driver interface: the entry point that turns a URL into a connection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::properties::Properties;
use crate::traits::connection::Connection;

/// Describes one connection property a driver understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverPropertyInfo {
    pub name: String,
    pub value: Option<String>,
    pub description: Option<String>,
    pub required: bool,
}

/// A connection factory registered with a [`DriverRegistry`](crate::DriverRegistry).
pub trait Driver: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Opens a connection, or `Ok(None)` when `url` belongs to another driver.
    fn connect(&self, url: &str, info: Option<&Properties>)
        -> Result<Option<Arc<dyn Connection>>>;

    fn accepts_url(&self, url: &str) -> Result<bool>;

    fn major_version(&self) -> u32;

    fn minor_version(&self) -> u32;

    fn property_info(&self, _url: &str, _info: Option<&Properties>) -> Result<Vec<DriverPropertyInfo>> {
        Ok(Vec::new())
    }

    fn compliant(&self) -> bool {
        true
    }
}

impl<T: Driver + ?Sized> Driver for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn connect(&self, url: &str, info: Option<&Properties>) -> Result<Option<Arc<dyn Connection>>> {
        (**self).connect(url, info)
    }

    fn accepts_url(&self, url: &str) -> Result<bool> {
        (**self).accepts_url(url)
    }

    fn major_version(&self) -> u32 {
        (**self).major_version()
    }

    fn minor_version(&self) -> u32 {
        (**self).minor_version()
    }

    fn property_info(&self, url: &str, info: Option<&Properties>) -> Result<Vec<DriverPropertyInfo>> {
        (**self).property_info(url, info)
    }

    fn compliant(&self) -> bool {
        (**self).compliant()
    }
}
