//! # connmock
//!
//! Scriptable interception for the connectivity API. A test installs a
//! program of steps for its thread, connects through a `jdbc:mock:` URL, and
//! every call on the returned proxies consumes the next step: pass through,
//! fail, return a constant, filter the real result, or wrap it in a nested
//! proxy with its own program.
//!
//! ## Modules
//! - `step`: one scripted behavior per call (Step, Filter, WrapStep)
//! - `program`: ordered steps with a pass-through tail (StepSupplier, Program)
//! - `proxy`: Wrap<T> and the per-interface proxies
//! - `auto_wrap`: proxy everything, recursively (WrapTable, AutoWrapSupplier)
//! - `driver`: MockDriver, the URL entry point
//! - `scope`: per-thread script slots and spawn-time inheritance
//! - `noop`: a backend that accepts every call
//! - `datum`: type-erased values carried through steps
//! - `config`, `version`, `logging`: settings, version metadata, tracing setup

pub mod auto_wrap;
pub mod config;
pub mod datum;
pub mod driver;
pub mod logging;
pub mod noop;
pub mod program;
pub mod proxy;
pub mod scope;
pub mod step;
pub mod version;

pub use auto_wrap::{AutoWrapSupplier, WrapEntry, WrapTable};
pub use config::{ConfigError, MockConfig};
pub use datum::{Datum, FromDatum, IntoDatum};
pub use driver::MockDriver;
pub use noop::NoopDriver;
pub use program::{Program, StepSupplier, Steps};
pub use proxy::{
    wrap, BlobWrap, CallableStatementWrap, ClobWrap, ConnectionWrap, DatabaseMetaDataWrap,
    NClobWrap, ParameterMetaDataWrap, PreparedStatementWrap, Proxied, ResultSetMetaDataWrap,
    ResultSetWrap, SavepointWrap, StatementWrap, Wrap,
};
pub use step::{Filter, Step, WrapStep};
pub use version::Version;

use std::sync::{Arc, LazyLock};

use connmock_api::DriverRegistry;

static REGISTRY: LazyLock<DriverRegistry> = LazyLock::new(|| {
    let registry = DriverRegistry::new();
    registry.register(MockDriver::instance());
    registry.register(Arc::new(NoopDriver::new()));
    registry
});

/// The process-wide registry, with the mock and no-op drivers registered.
pub fn registry() -> &'static DriverRegistry {
    &REGISTRY
}

/// Installs a program for the current thread on the process-wide driver.
pub fn set_program(steps: impl Into<Arc<[Step]>>) {
    MockDriver::instance().set_program(steps);
}

/// Installs a supplier for the current thread on the process-wide driver.
pub fn set_steps(steps: Steps) {
    MockDriver::instance().set_steps(steps);
}

/// Restores pass-through for the current thread on the process-wide driver.
pub fn clear() {
    MockDriver::instance().clear();
}

/// Shows secret connection properties in the process-wide driver's logs.
pub fn set_reveal_credentials(reveal: bool) {
    MockDriver::instance().set_reveal_credentials(reveal);
}
