//! Proxies: [`Wrap<T>`] stands in for a delegate and routes every call of its
//! interface through the next step of its supplier.
//!
//! Each interface method is implemented once, as a blanket impl over
//! `Wrap<S>` for every `S` implementing that interface, so the proxy for a
//! subtype picks up the methods of its supertypes. The `proxy!` macro below
//! adds the per-interface glue: the [`Handle`] impl and the [`Proxied`]
//! constructor.
//!
//! Identity, equality, hashing and `Debug` never consume a step.

mod connection;
mod lob;
mod metadata;
mod result_set;
mod statement;

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use connmock_api::{
    ApiObject, ApiType, Blob, CallableStatement, Clob, Connection, DatabaseMetaData, Error, Handle,
    Interface, NClob, Narrow, ObjectId, ParameterMetaData, PreparedStatement, Result, ResultSet,
    ResultSetMetaData, Savepoint, Statement,
};
use tracing::trace;

use crate::datum::{FromDatum, IntoDatum};
use crate::program::Steps;

/// A proxy over `delegate` driven by `steps`.
pub struct Wrap<T: ?Sized> {
    delegate: Arc<T>,
    steps: Steps,
}

impl<T: ?Sized> Wrap<T> {
    pub fn new(delegate: Arc<T>, steps: Steps) -> Self {
        Self { delegate, steps }
    }

    pub fn delegate(&self) -> &Arc<T> {
        &self.delegate
    }

    pub fn steps(&self) -> &Steps {
        &self.steps
    }
}

impl<T: ?Sized + 'static> Wrap<T> {
    /// The concrete proxy behind `handle`, if it is a `Wrap<T>`.
    pub fn of(handle: &dyn Handle) -> Option<&Self> {
        let any: &dyn Any = handle;
        any.downcast_ref::<Self>()
    }
}

impl<T: ?Sized + Handle> Wrap<T> {
    /// Applies the next step to a value-shaped call on the delegate.
    fn invoke<R, F>(&self, operation: &'static str, args: fmt::Arguments<'_>, call: F) -> Result<R>
    where
        R: IntoDatum + FromDatum,
        F: FnOnce() -> Result<R>,
    {
        let step = self.steps.next_step();
        let interface = self.delegate.interface();
        trace!(%interface, operation, "Apply {} to {}.{}({})", step, interface, operation, args);
        let result = step.apply_value(|| call().map(IntoDatum::into_datum));
        match &result {
            Ok(value) => trace!(%interface, operation, "Result: {}", value),
            Err(error) => trace!(%interface, operation, "Failed: {}", error),
        }
        result.and_then(R::from_datum)
    }

    /// Applies the next step to a void-shaped call on the delegate.
    fn invoke_void<F>(&self, operation: &'static str, args: fmt::Arguments<'_>, call: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        let step = self.steps.next_step();
        let interface = self.delegate.interface();
        trace!(%interface, operation, "Apply {} to {}.{}({})", step, interface, operation, args);
        let result = step.apply_void(call);
        if let Err(error) = &result {
            trace!(%interface, operation, "Failed: {}", error);
        }
        result
    }

    /// Void call whose declared failure type `E` is narrower than [`Error`].
    fn invoke_narrow<E, F>(&self, operation: &'static str, args: fmt::Arguments<'_>, call: F) -> Result<(), E>
    where
        E: Narrow + Into<Error>,
        F: FnOnce() -> Result<(), E>,
    {
        self.invoke_void(operation, args, || call().map_err(Into::into))
            .map_err(|error| E::narrow(operation, error))
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Wrap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrap")
            .field("wrapped", &self.delegate)
            .field("steps", &self.steps)
            .finish()
    }
}

impl<T: ?Sized + Handle> PartialEq for Wrap<T> {
    fn eq(&self, other: &Self) -> bool {
        self.delegate.identity() == other.delegate.identity()
    }
}

impl<T: ?Sized + Handle> Eq for Wrap<T> {}

impl<T: ?Sized + Handle> Hash for Wrap<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.delegate.identity().hash(state);
    }
}

/// Interfaces with a standard proxy.
pub trait Proxied: ApiType {
    /// Proxies `delegate` over `steps`. This is the wrap constructor used by
    /// [`Step::wrap_proxy`](crate::Step::wrap_proxy) and the auto-wrap table.
    fn wrap(delegate: Arc<Self>, steps: Steps) -> Arc<Self>;
}

/// Proxies `delegate` over `steps` with the standard proxy for `T`.
pub fn wrap<T: Proxied + ?Sized>(delegate: Arc<T>, steps: Steps) -> Arc<T> {
    T::wrap(delegate, steps)
}

macro_rules! proxy {
    ($($iface:ident => $alias:ident;)*) => {$(
        #[doc = concat!("Proxy for [`", stringify!($iface), "`].")]
        pub type $alias = Wrap<dyn $iface>;

        impl Handle for Wrap<dyn $iface> {
            fn interface(&self) -> Interface {
                Interface::$iface
            }

            fn into_object(self: Arc<Self>) -> ApiObject {
                ApiObject::$iface(self)
            }

            fn identity(&self) -> ObjectId {
                self.delegate.identity()
            }

            fn is_wrapper_for(&self, interface: Interface) -> Result<bool> {
                self.invoke("is_wrapper_for", format_args!("{}", interface), || {
                    self.delegate.is_wrapper_for(interface)
                })
            }
        }

        impl Proxied for dyn $iface {
            fn wrap(delegate: Arc<Self>, steps: Steps) -> Arc<Self> {
                Arc::new(Wrap::new(delegate, steps))
            }
        }
    )*};
}

proxy! {
    Blob => BlobWrap;
    CallableStatement => CallableStatementWrap;
    Clob => ClobWrap;
    Connection => ConnectionWrap;
    DatabaseMetaData => DatabaseMetaDataWrap;
    NClob => NClobWrap;
    ParameterMetaData => ParameterMetaDataWrap;
    PreparedStatement => PreparedStatementWrap;
    ResultSet => ResultSetWrap;
    ResultSetMetaData => ResultSetMetaDataWrap;
    Savepoint => SavepointWrap;
    Statement => StatementWrap;
}
