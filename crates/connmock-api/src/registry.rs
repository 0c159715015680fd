//! Process-wide style registry of drivers, consulted in registration order.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::errors::{Error, Result, SqlError, STATE_NO_SUITABLE_DRIVER};
use crate::properties::Properties;
use crate::traits::{Connection, Driver};

/// Ordered set of drivers. A URL is offered to each driver in turn until one
/// returns a connection.
#[derive(Debug, Default)]
pub struct DriverRegistry {
    drivers: RwLock<Vec<Arc<dyn Driver>>>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `driver`. Returns false if a driver with the same name is
    /// already registered.
    pub fn register(&self, driver: Arc<dyn Driver>) -> bool {
        let mut drivers = self.drivers.write().unwrap_or_else(PoisonError::into_inner);
        if drivers.iter().any(|d| d.name() == driver.name()) {
            return false;
        }
        debug!(driver = driver.name(), "registered driver");
        drivers.push(driver);
        true
    }

    pub fn deregister(&self, name: &str) -> bool {
        let mut drivers = self.drivers.write().unwrap_or_else(PoisonError::into_inner);
        let before = drivers.len();
        drivers.retain(|d| d.name() != name);
        before != drivers.len()
    }

    /// Snapshot of the registered drivers. Connecting works on a snapshot so a
    /// driver may call back into the registry.
    pub fn drivers(&self) -> Vec<Arc<dyn Driver>> {
        self.drivers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// First driver that accepts `url`.
    pub fn driver_for(&self, url: &str) -> Result<Arc<dyn Driver>> {
        for driver in self.drivers() {
            if driver.accepts_url(url)? {
                return Ok(driver);
            }
        }
        Err(no_suitable_driver(url))
    }

    /// Offers `url` to every driver. The first connection wins; if none is
    /// produced, the first failure is returned, else "no suitable driver".
    pub fn connect(&self, url: &str, info: Option<&Properties>) -> Result<Arc<dyn Connection>> {
        let mut first_failure: Option<Error> = None;
        for driver in self.drivers() {
            trace!(driver = driver.name(), url, "trying driver");
            match driver.connect(url, info) {
                Ok(Some(connection)) => return Ok(connection),
                Ok(None) => {}
                Err(e) => {
                    debug!(driver = driver.name(), url, error = %e, "driver failed to connect");
                    first_failure.get_or_insert(e);
                }
            }
        }
        Err(first_failure.unwrap_or_else(|| no_suitable_driver(url)))
    }
}

fn no_suitable_driver(url: &str) -> Error {
    SqlError::with_state(format!("No suitable driver found for {url}"), STATE_NO_SUITABLE_DRIVER)
        .into()
}
