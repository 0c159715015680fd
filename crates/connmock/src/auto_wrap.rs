//! Recursive auto-wrapping: every connectivity object returned through an
//! auto-wrapped proxy comes back proxied by the same supplier.
//!
//! Installing [`AutoWrapSupplier::shared`] at the entry point gives a
//! "log and pass through everything" mode with no further configuration.

use std::sync::{Arc, LazyLock};

use connmock_api::{
    ApiObject, Blob, CallableStatement, Clob, Connection, DatabaseMetaData, Interface, NClob,
    ParameterMetaData, PreparedStatement, Result, ResultSet, ResultSetMetaData, Savepoint,
    Statement, UsageError,
};
use tracing::trace;

use crate::datum::Datum;
use crate::program::{StepSupplier, Steps};
use crate::proxy::Proxied;
use crate::step::Step;

type Rewrap = fn(ApiObject, Steps) -> std::result::Result<ApiObject, ApiObject>;

/// One row of a [`WrapTable`]: an interface and the constructor proxying it.
#[derive(Clone, Copy)]
pub struct WrapEntry {
    interface: Interface,
    rewrap: Rewrap,
}

impl WrapEntry {
    /// Entry for the standard proxy of `T`.
    pub fn of<T: Proxied + ?Sized>() -> Self {
        Self {
            interface: T::INTERFACE,
            rewrap: rewrap_as::<T>,
        }
    }

    pub fn interface(&self) -> Interface {
        self.interface
    }
}

impl std::fmt::Debug for WrapEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("WrapEntry").field(&self.interface).finish()
    }
}

fn rewrap_as<T: Proxied + ?Sized>(
    object: ApiObject,
    steps: Steps,
) -> std::result::Result<ApiObject, ApiObject> {
    let target = T::from_object(object)?;
    Ok(connmock_api::Handle::into_object(T::wrap(target, steps)))
}

/// Ordered (interface, constructor) pairs. The first entry whose interface
/// the object implements wins, so subtypes must precede their supertypes.
#[derive(Debug, Clone)]
pub struct WrapTable {
    entries: Vec<WrapEntry>,
}

static STANDARD: LazyLock<WrapTable> = LazyLock::new(|| WrapTable {
    entries: vec![
        WrapEntry::of::<dyn Blob>(),
        WrapEntry::of::<dyn CallableStatement>(),
        WrapEntry::of::<dyn Connection>(),
        WrapEntry::of::<dyn DatabaseMetaData>(),
        WrapEntry::of::<dyn NClob>(),
        WrapEntry::of::<dyn Clob>(),
        WrapEntry::of::<dyn ParameterMetaData>(),
        WrapEntry::of::<dyn PreparedStatement>(),
        WrapEntry::of::<dyn ResultSet>(),
        WrapEntry::of::<dyn ResultSetMetaData>(),
        WrapEntry::of::<dyn Savepoint>(),
        WrapEntry::of::<dyn Statement>(),
    ],
});

impl WrapTable {
    /// Builds a table, rejecting any entry that follows one of its supertypes.
    pub fn new(entries: Vec<WrapEntry>) -> Result<Self> {
        check_order(&entries)?;
        Ok(Self { entries })
    }

    /// Table covering every interface of the family.
    pub fn standard() -> &'static WrapTable {
        &STANDARD
    }

    pub fn entries(&self) -> &[WrapEntry] {
        &self.entries
    }

    /// Proxies `object` with the first matching entry, or returns it
    /// unchanged when no entry matches.
    pub fn rewrap(&self, object: ApiObject, steps: &Steps) -> ApiObject {
        let mut object = object;
        for entry in &self.entries {
            match (entry.rewrap)(object, Arc::clone(steps)) {
                Ok(proxy) => {
                    trace!(interface = %entry.interface, "auto-wrapped result");
                    return proxy;
                }
                Err(unmatched) => object = unmatched,
            }
        }
        object
    }
}

fn check_order(entries: &[WrapEntry]) -> std::result::Result<(), UsageError> {
    for (at, earlier) in entries.iter().enumerate() {
        for later in &entries[at + 1..] {
            if later.interface != earlier.interface && later.interface.is_a(earlier.interface) {
                return Err(UsageError::TableOrder {
                    child: later.interface,
                    parent: earlier.interface,
                });
            }
        }
    }
    Ok(())
}

/// Stateless supplier whose only step re-wraps results with itself.
#[derive(Debug)]
pub struct AutoWrapSupplier {
    _private: (),
}

static SHARED: LazyLock<Steps> = LazyLock::new(|| Arc::new(AutoWrapSupplier { _private: () }));

impl AutoWrapSupplier {
    /// The process-wide instance.
    pub fn shared() -> Steps {
        Arc::clone(&SHARED)
    }

    /// Proxies an object result through the standard table over the shared
    /// supplier; other results pass unchanged.
    pub(crate) fn rewrap(datum: Datum) -> Datum {
        match datum {
            Datum::Object(object) => {
                Datum::Object(WrapTable::standard().rewrap(object, &SHARED))
            }
            other => other,
        }
    }
}

impl StepSupplier for AutoWrapSupplier {
    fn next_step(&self) -> Step {
        Step::AutoWrap
    }
}
