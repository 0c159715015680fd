//! Wrap steps: proxy a result over a fresh nested program.

use std::fmt;
use std::sync::Arc;

use connmock_api::{ApiType, Interface, Result};

use crate::datum::{Datum, FromDatum, IntoDatum};
use crate::program::{Program, Steps};
use crate::step::Step;

type Rewrap = dyn Fn(Datum, Steps) -> Result<Datum> + Send + Sync;

/// Filter that proxies the delegate's result with a wrap constructor.
///
/// Every firing builds a fresh [`Program`] over the same authored steps, so
/// each returned proxy consumes its own copy of the nested script.
#[derive(Clone)]
pub struct WrapStep {
    interface: Interface,
    steps: Arc<[Step]>,
    rewrap: Arc<Rewrap>,
}

impl WrapStep {
    pub fn new<T, F>(wrap: F, steps: impl Into<Arc<[Step]>>) -> Self
    where
        T: ApiType + ?Sized,
        F: Fn(Arc<T>, Steps) -> Arc<T> + Send + Sync + 'static,
    {
        Self::over(wrap, steps.into())
    }

    fn over<T, F>(wrap: F, steps: Arc<[Step]>) -> Self
    where
        T: ApiType + ?Sized,
        F: Fn(Arc<T>, Steps) -> Arc<T> + Send + Sync + 'static,
    {
        let rewrap = move |datum: Datum, child: Steps| -> Result<Datum> {
            let target = Arc::<T>::from_datum(datum)?;
            Ok(wrap(target, child).into_datum())
        };
        Self {
            interface: T::INTERFACE,
            steps,
            rewrap: Arc::new(rewrap),
        }
    }

    /// Interface of the proxies this step builds.
    pub fn interface(&self) -> Interface {
        self.interface
    }

    /// The nested script each proxy starts from.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Null results have nothing to wrap and pass unchanged.
    pub fn apply(&self, datum: Datum) -> Result<Datum> {
        if datum.is_null() {
            return Ok(datum);
        }
        let child: Steps = Arc::new(Program::new(Arc::clone(&self.steps)));
        (self.rewrap)(datum, child)
    }
}

impl fmt::Display for WrapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.interface, self.steps)
    }
}

impl fmt::Debug for WrapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
