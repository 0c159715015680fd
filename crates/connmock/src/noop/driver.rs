//! `jdbc:noop` driver.

use std::sync::Arc;

use connmock_api::{Connection, Driver, Properties, Result};
use tracing::trace;

use super::objects::NoopConnection;
use super::NOOP_URL;
use crate::version::Version;

/// Driver for [`NOOP_URL`]. Every connection it returns is the same shared
/// [`NoopConnection`].
#[derive(Debug)]
pub struct NoopDriver {
    version: Version,
}

impl NoopDriver {
    pub fn new() -> Self {
        Self {
            version: Version::packaged(),
        }
    }

    fn accepts(url: &str) -> bool {
        match url.strip_prefix(NOOP_URL) {
            Some(rest) => rest.is_empty() || rest.starts_with(':'),
            None => false,
        }
    }
}

impl Default for NoopDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for NoopDriver {
    fn name(&self) -> &str {
        "noop"
    }

    fn connect(&self, url: &str, _info: Option<&Properties>) -> Result<Option<Arc<dyn Connection>>> {
        if !Self::accepts(url) {
            return Ok(None);
        }
        trace!(url, "noop connection");
        Ok(Some(NoopConnection::shared()))
    }

    fn accepts_url(&self, url: &str) -> Result<bool> {
        Ok(Self::accepts(url))
    }

    fn major_version(&self) -> u32 {
        self.version.major
    }

    fn minor_version(&self) -> u32 {
        self.version.minor
    }
}

#[cfg(test)]
mod tests {
    use connmock_api::Handle;

    use super::*;

    #[test]
    fn accepts_bare_and_suffixed_urls() {
        let driver = NoopDriver::new();
        assert!(driver.accepts_url("jdbc:noop").unwrap());
        assert!(driver.accepts_url("jdbc:noop:").unwrap());
        assert!(driver.accepts_url("jdbc:noop:anything").unwrap());
        assert!(!driver.accepts_url("jdbc:noopish").unwrap());
        assert!(!driver.accepts_url("jdbc:mock:noop:").unwrap());
    }

    #[test]
    fn connections_are_shared() {
        let driver = NoopDriver::new();
        let a = driver.connect("jdbc:noop:", None).unwrap().unwrap();
        let b = driver.connect("jdbc:noop", None).unwrap().unwrap();
        assert_eq!(a.identity(), b.identity());
        assert!(driver.connect("jdbc:other:", None).unwrap().is_none());
    }
}
