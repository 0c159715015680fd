//! `jdbc:sqlite:` driver.

use std::path::Path;
use std::sync::Arc;

use connmock_api::{Connection, Driver, DriverPropertyInfo, Properties, Result};
use tracing::debug;

use crate::connection::SqliteConnection;
use crate::errors::BackendError;
use crate::{DRIVER_NAME, URL_PREFIX};

/// Locations that open a private in-memory database.
const MEMORY_LOCATIONS: &[&str] = &[":memory:", "mem:"];

/// Opens SQLite databases for `jdbc:sqlite:<path>` URLs.
#[derive(Debug, Default)]
pub struct SqliteDriver {
    _private: (),
}

impl SqliteDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Driver for SqliteDriver {
    fn name(&self) -> &str {
        DRIVER_NAME
    }

    fn connect(&self, url: &str, info: Option<&Properties>) -> Result<Option<Arc<dyn Connection>>> {
        let Some(location) = url.strip_prefix(URL_PREFIX) else {
            return Ok(None);
        };
        let user = info.and_then(|p| p.get("user"));
        let connection: Arc<dyn Connection> = if MEMORY_LOCATIONS.contains(&location) {
            SqliteConnection::open_in_memory(url, user)?
        } else if location.is_empty() {
            return Err(BackendError::BadUrl { url: url.to_string() }.into());
        } else {
            SqliteConnection::open(Path::new(location), url, user)?
        };
        debug!(url, "sqlite connection ready");
        Ok(Some(connection))
    }

    fn accepts_url(&self, url: &str) -> Result<bool> {
        Ok(url.starts_with(URL_PREFIX))
    }

    fn major_version(&self) -> u32 {
        env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0)
    }

    fn minor_version(&self) -> u32 {
        env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0)
    }

    fn property_info(&self, _url: &str, info: Option<&Properties>) -> Result<Vec<DriverPropertyInfo>> {
        Ok(vec![DriverPropertyInfo {
            name: "user".to_string(),
            value: info.and_then(|p| p.get("user")).map(str::to_string),
            description: Some("reported as the connection's user name".to_string()),
            required: false,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declines_other_urls() {
        let driver = SqliteDriver::new();
        assert!(driver.connect("jdbc:noop:", None).unwrap().is_none());
        assert!(!driver.accepts_url("jdbc:mock:sqlite::memory:").unwrap());
    }

    #[test]
    fn empty_location_is_rejected() {
        let err = SqliteDriver::new().connect("jdbc:sqlite:", None).unwrap_err();
        assert!(err.to_string().contains("unsupported url"));
    }

    #[test]
    fn memory_aliases_open_databases() {
        let driver = SqliteDriver::new();
        for url in ["jdbc:sqlite::memory:", "jdbc:sqlite:mem:"] {
            let connection = driver.connect(url, None).unwrap().unwrap();
            assert!(!connection.is_closed().unwrap());
        }
    }
}
