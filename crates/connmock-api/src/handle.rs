//! Introspection shared by every object of the connectivity API, and the
//! type-erased [`ApiObject`] that carries such objects across step boundaries.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::errors::Result;
use crate::interface::Interface;
use crate::traits::{
    Blob, CallableStatement, Clob, Connection, DatabaseMetaData, NClob, ParameterMetaData,
    PreparedStatement, ResultSet, ResultSetMetaData, Savepoint, Statement,
};

/// Identity of an underlying object. Proxies report their delegate's identity,
/// so a proxy and the object it wraps share one.
pub type ObjectId = usize;

/// Capability every connectivity object has: a runtime interface tag,
/// identity, and "is this a wrapper for" introspection.
pub trait Handle: Any + Send + Sync + fmt::Debug {
    /// Most specific interface this object implements.
    fn interface(&self) -> Interface;

    /// Converts a shared handle into its type-erased form, keeping the most
    /// specific interface.
    fn into_object(self: Arc<Self>) -> ApiObject;

    fn identity(&self) -> ObjectId {
        (self as *const Self).cast::<()>() as usize
    }

    fn is_wrapper_for(&self, interface: Interface) -> Result<bool> {
        Ok(self.interface().is_a(interface))
    }
}

// ─── ApiObject ──────────────────────────────────────────────────────────────

/// Any object of the connectivity family, tagged by its most specific
/// interface.
#[derive(Clone)]
pub enum ApiObject {
    Blob(Arc<dyn Blob>),
    CallableStatement(Arc<dyn CallableStatement>),
    Clob(Arc<dyn Clob>),
    Connection(Arc<dyn Connection>),
    DatabaseMetaData(Arc<dyn DatabaseMetaData>),
    NClob(Arc<dyn NClob>),
    ParameterMetaData(Arc<dyn ParameterMetaData>),
    PreparedStatement(Arc<dyn PreparedStatement>),
    ResultSet(Arc<dyn ResultSet>),
    ResultSetMetaData(Arc<dyn ResultSetMetaData>),
    Savepoint(Arc<dyn Savepoint>),
    Statement(Arc<dyn Statement>),
}

impl ApiObject {
    pub fn interface(&self) -> Interface {
        match self {
            ApiObject::Blob(_) => Interface::Blob,
            ApiObject::CallableStatement(_) => Interface::CallableStatement,
            ApiObject::Clob(_) => Interface::Clob,
            ApiObject::Connection(_) => Interface::Connection,
            ApiObject::DatabaseMetaData(_) => Interface::DatabaseMetaData,
            ApiObject::NClob(_) => Interface::NClob,
            ApiObject::ParameterMetaData(_) => Interface::ParameterMetaData,
            ApiObject::PreparedStatement(_) => Interface::PreparedStatement,
            ApiObject::ResultSet(_) => Interface::ResultSet,
            ApiObject::ResultSetMetaData(_) => Interface::ResultSetMetaData,
            ApiObject::Savepoint(_) => Interface::Savepoint,
            ApiObject::Statement(_) => Interface::Statement,
        }
    }

    pub fn handle(&self) -> &dyn Handle {
        match self {
            ApiObject::Blob(it) => &**it,
            ApiObject::CallableStatement(it) => &**it,
            ApiObject::Clob(it) => &**it,
            ApiObject::Connection(it) => &**it,
            ApiObject::DatabaseMetaData(it) => &**it,
            ApiObject::NClob(it) => &**it,
            ApiObject::ParameterMetaData(it) => &**it,
            ApiObject::PreparedStatement(it) => &**it,
            ApiObject::ResultSet(it) => &**it,
            ApiObject::ResultSetMetaData(it) => &**it,
            ApiObject::Savepoint(it) => &**it,
            ApiObject::Statement(it) => &**it,
        }
    }

    pub fn identity(&self) -> ObjectId {
        self.handle().identity()
    }

    /// Recovers a typed handle; gives the object back when it does not
    /// implement `T`.
    pub fn downcast<T: ApiType + ?Sized>(self) -> std::result::Result<Arc<T>, ApiObject> {
        T::from_object(self)
    }
}

impl fmt::Debug for ApiObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.handle(), f)
    }
}

impl PartialEq for ApiObject {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for ApiObject {}

impl Hash for ApiObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

// ─── Typed access ───────────────────────────────────────────────────────────

/// Implemented by each `dyn Interface` of the family.
pub trait ApiType: Handle {
    const INTERFACE: Interface;

    /// Accepts objects whose interface is `INTERFACE` or one of its subtypes.
    fn from_object(object: ApiObject) -> std::result::Result<Arc<Self>, ApiObject>;
}

macro_rules! api_type {
    ($iface:ident $(, $sub:ident)*) => {
        impl ApiType for dyn $iface {
            const INTERFACE: Interface = Interface::$iface;

            fn from_object(object: ApiObject) -> std::result::Result<Arc<Self>, ApiObject> {
                match object {
                    ApiObject::$iface(it) => Ok(it),
                    $(ApiObject::$sub(it) => {
                        let up: Arc<dyn $iface> = it;
                        Ok(up)
                    })*
                    other => Err(other),
                }
            }
        }

        impl PartialEq for dyn $iface {
            fn eq(&self, other: &Self) -> bool {
                self.identity() == other.identity()
            }
        }

        impl Eq for dyn $iface {}

        impl Hash for dyn $iface {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.identity().hash(state);
            }
        }
    };
}

api_type!(Blob);
api_type!(CallableStatement);
api_type!(Clob, NClob);
api_type!(Connection);
api_type!(DatabaseMetaData);
api_type!(NClob);
api_type!(ParameterMetaData);
api_type!(PreparedStatement, CallableStatement);
api_type!(ResultSet);
api_type!(ResultSetMetaData);
api_type!(Savepoint);
api_type!(Statement, PreparedStatement, CallableStatement);
