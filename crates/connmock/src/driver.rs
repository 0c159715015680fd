//! The entry point: a driver that claims mock URLs, forwards them to the real
//! driver for the substituted URL, and applies the current thread's script to
//! the connect call.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};

use connmock_api::{Connection, Driver, DriverRegistry, Properties, Result, UsageError};
use tracing::{debug, trace};

use crate::config::MockConfig;
use crate::program::{Program, StepSupplier, Steps};
use crate::scope::ScriptSlot;
use crate::step::Step;
use crate::version::Version;

static INSTANCE: LazyLock<Arc<MockDriver>> =
    LazyLock::new(|| Arc::new(MockDriver::new(MockConfig::default())));

/// Mock driver. Each thread installs its own supplier; a thread with none
/// passes every call through.
#[derive(Debug)]
pub struct MockDriver {
    slot: ScriptSlot,
    config: MockConfig,
    version: Version,
    reveal_credentials: AtomicBool,
    /// `None` resolves to the process-wide registry at connect time.
    registry: Option<Arc<DriverRegistry>>,
}

impl MockDriver {
    /// The process-wide driver, registered in [`crate::registry`].
    pub fn instance() -> Arc<MockDriver> {
        Arc::clone(&INSTANCE)
    }

    pub fn new(config: MockConfig) -> Self {
        let version = match &config.metadata_file {
            Some(path) => Version::load(path),
            None => Version::packaged(),
        };
        Self {
            slot: ScriptSlot::new(),
            reveal_credentials: AtomicBool::new(config.effective_reveal_credentials()),
            config,
            version,
            registry: None,
        }
    }

    /// Default configuration with the version read from `path`.
    pub fn with_metadata(path: &Path) -> Self {
        Self::new(MockConfig {
            metadata_file: Some(path.to_path_buf()),
            ..MockConfig::default()
        })
    }

    /// Resolves substituted URLs through `registry` instead of the
    /// process-wide one.
    pub fn with_registry(mut self, registry: Arc<DriverRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Installs a fresh program over `steps` for the current thread.
    pub fn set_program(&self, steps: impl Into<Arc<[Step]>>) {
        self.set_steps(Program::shared(steps));
    }

    /// Installs `steps` for the current thread.
    pub fn set_steps(&self, steps: Steps) {
        debug!(?steps, "install step supplier");
        self.slot.set(steps);
    }

    /// Removes the current thread's supplier, restoring pass-through.
    pub fn clear(&self) {
        if let Some(steps) = self.slot.clear() {
            debug!(?steps, "remove step supplier");
        }
    }

    /// The current thread's supplier, if any.
    pub fn steps(&self) -> Option<Steps> {
        self.slot.get()
    }

    pub fn set_reveal_credentials(&self, reveal: bool) {
        self.reveal_credentials.store(reveal, Ordering::Relaxed);
    }

    pub fn reveals_credentials(&self) -> bool {
        self.reveal_credentials.load(Ordering::Relaxed)
    }

    fn next_step(&self) -> Step {
        self.slot
            .get()
            .map_or_else(Step::default, |steps| steps.next_step())
    }

    fn registry(&self) -> &DriverRegistry {
        match &self.registry {
            Some(registry) => registry,
            None => crate::registry(),
        }
    }

    fn describe_info(&self, info: Option<&Properties>) -> String {
        match info {
            None => "None".to_string(),
            Some(info) if self.reveals_credentials() => info.to_string(),
            Some(info) => {
                let keys = self.config.effective_secret_keys();
                info.redacted(&keys).to_string()
            }
        }
    }
}

impl Driver for MockDriver {
    fn name(&self) -> &str {
        "connmock"
    }

    fn connect(&self, url: &str, info: Option<&Properties>) -> Result<Option<Arc<dyn Connection>>> {
        let prefix = self.config.effective_url_prefix();
        let Some(rest) = url.strip_prefix(prefix) else {
            return Ok(None);
        };
        let target = format!("{}{}", self.config.effective_target_prefix(), rest);
        if target.starts_with(prefix) {
            return Err(UsageError::SelfReferencingUrl {
                url: url.to_string(),
            }
            .into());
        }

        let step = self.next_step();
        trace!(
            "Apply {} to DriverRegistry::connect({},{})",
            step,
            target,
            self.describe_info(info)
        );
        let result = step.apply(|| self.registry().connect(&target, info));
        match &result {
            Ok(connection) => trace!("Result: {:?}", connection),
            Err(error) => trace!("Failed: {}", error),
        }
        result.map(Some)
    }

    fn accepts_url(&self, url: &str) -> Result<bool> {
        Ok(url.starts_with(self.config.effective_url_prefix()))
    }

    fn major_version(&self) -> u32 {
        self.version.major
    }

    fn minor_version(&self) -> u32 {
        self.version.minor
    }
}
