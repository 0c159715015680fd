//! Failure kinds crossing the connectivity API.
//!
//! Scripted failures must reach the caller as the exact instance that was
//! scripted, so both failure payloads ([`SqlError`] and [`RuntimeFailure`])
//! are reference counted and cheap to clone. Identity is checked with
//! `ptr_eq`, never with value equality.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::interface::Interface;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// SQL state used when no backend accepted a URL.
pub const STATE_NO_SUITABLE_DRIVER: &str = "08001";
/// SQL state used for operations on a closed connection or statement.
pub const STATE_CONNECTION_CLOSED: &str = "08003";
/// SQL state used for optional features a backend does not provide.
pub const STATE_FEATURE_NOT_SUPPORTED: &str = "0A000";
/// SQL state used when a stored value cannot be read as the requested type.
pub const STATE_INVALID_CAST: &str = "22018";

// ─── Connectivity failures ──────────────────────────────────────────────────

/// Sub-kind of a connectivity failure. Operations that may only fail with a
/// narrower kind accept just the matching variant (see [`Narrow`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlErrorKind {
    General,
    ClientInfo,
    FeatureNotSupported,
}

#[derive(Debug)]
struct SqlErrorInner {
    message: String,
    sql_state: Option<String>,
    vendor_code: i32,
    kind: SqlErrorKind,
}

/// The connectivity API's declared failure kind.
#[derive(Clone)]
pub struct SqlError(Arc<SqlErrorInner>);

impl SqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_parts(SqlErrorKind::General, message, None, 0)
    }

    pub fn with_state(message: impl Into<String>, sql_state: impl Into<String>) -> Self {
        Self::from_parts(SqlErrorKind::General, message, Some(sql_state.into()), 0)
    }

    pub fn with_code(
        message: impl Into<String>,
        sql_state: impl Into<String>,
        vendor_code: i32,
    ) -> Self {
        Self::from_parts(
            SqlErrorKind::General,
            message,
            Some(sql_state.into()),
            vendor_code,
        )
    }

    pub fn client_info(message: impl Into<String>) -> Self {
        Self::from_parts(SqlErrorKind::ClientInfo, message, None, 0)
    }

    pub fn feature_not_supported(message: impl Into<String>) -> Self {
        Self::from_parts(
            SqlErrorKind::FeatureNotSupported,
            message,
            Some(STATE_FEATURE_NOT_SUPPORTED.to_string()),
            0,
        )
    }

    pub fn from_parts(
        kind: SqlErrorKind,
        message: impl Into<String>,
        sql_state: Option<String>,
        vendor_code: i32,
    ) -> Self {
        Self(Arc::new(SqlErrorInner {
            message: message.into(),
            sql_state,
            vendor_code,
            kind,
        }))
    }

    pub fn message(&self) -> &str {
        &self.0.message
    }

    pub fn sql_state(&self) -> Option<&str> {
        self.0.sql_state.as_deref()
    }

    pub fn vendor_code(&self) -> i32 {
        self.0.vendor_code
    }

    pub fn kind(&self) -> SqlErrorKind {
        self.0.kind
    }

    /// True when both values are the same scripted instance.
    pub fn ptr_eq(&self, other: &SqlError) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for SqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.message)?;
        if let Some(state) = &self.0.sql_state {
            write!(f, " (state {state}, code {})", self.0.vendor_code)?;
        }
        Ok(())
    }
}

impl fmt::Debug for SqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlError")
            .field("kind", &self.0.kind)
            .field("message", &self.0.message)
            .field("sql_state", &self.0.sql_state)
            .field("vendor_code", &self.0.vendor_code)
            .finish()
    }
}

impl StdError for SqlError {}

// ─── Runtime failures ───────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(String);

/// Unchecked-category failure: any error that is not part of the
/// connectivity API's declared failure kind.
#[derive(Clone)]
pub struct RuntimeFailure(Arc<dyn StdError + Send + Sync>);

impl RuntimeFailure {
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message(message.into()))
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    pub fn ptr_eq(&self, other: &RuntimeFailure) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for RuntimeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for RuntimeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RuntimeFailure").field(&self.0).finish()
    }
}

impl StdError for RuntimeFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

// ─── Usage errors ───────────────────────────────────────────────────────────

/// A script asked for something structurally impossible.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("void cannot be wrapped")]
    VoidNotWrappable,

    #[error("void cannot be filtered")]
    VoidNotFiltered,

    #[error("a supplied value cannot complete a void call")]
    SuppliedForVoid,

    #[error("an action has no value to return")]
    ActionHasNoValue,

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("url {url} would route back to the mock driver")]
    SelfReferencingUrl { url: String },

    #[error("{child} must precede its supertype {parent} in a wrap table")]
    TableOrder { child: Interface, parent: Interface },
}

// ─── Top-level error ────────────────────────────────────────────────────────

/// Every failure an intercepted call can produce.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Sql(#[from] SqlError),

    #[error(transparent)]
    Runtime(#[from] RuntimeFailure),

    #[error(transparent)]
    Usage(#[from] UsageError),

    /// A connectivity failure crossed an operation that only admits a
    /// narrower kind.
    #[error("{operation}: unsupported exception")]
    Unsupported {
        operation: &'static str,
        #[source]
        cause: Box<Error>,
    },
}

impl Error {
    pub fn unsupported(operation: &'static str, cause: Error) -> Self {
        Self::Unsupported {
            operation,
            cause: Box::new(cause),
        }
    }

    pub fn as_sql(&self) -> Option<&SqlError> {
        match self {
            Self::Sql(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_usage(&self) -> Option<&UsageError> {
        match self {
            Self::Usage(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// SQL state of a connectivity failure, if any.
    pub fn sql_state(&self) -> Option<&str> {
        self.as_sql().and_then(SqlError::sql_state)
    }

    /// Identity comparison: true when both errors carry the same instance.
    pub fn ptr_eq(&self, other: &Error) -> bool {
        match (self, other) {
            (Self::Sql(a), Self::Sql(b)) => a.ptr_eq(b),
            (Self::Runtime(a), Self::Runtime(b)) => a.ptr_eq(b),
            (Self::Usage(a), Self::Usage(b)) => a == b,
            (
                Self::Unsupported {
                    operation: a,
                    cause: ca,
                },
                Self::Unsupported {
                    operation: b,
                    cause: cb,
                },
            ) => a == b && ca.ptr_eq(cb),
            _ => false,
        }
    }
}

// ─── Narrower failure kinds ─────────────────────────────────────────────────

/// Failure of an operation declared to fail only with client-info errors.
#[derive(Debug, Clone, thiserror::Error)]
#[error(transparent)]
pub struct ClientInfoError(Error);

impl ClientInfoError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(Error::Sql(SqlError::client_info(message)))
    }

    pub fn get(&self) -> &Error {
        &self.0
    }

    pub fn into_inner(self) -> Error {
        self.0
    }
}

impl From<ClientInfoError> for Error {
    fn from(error: ClientInfoError) -> Self {
        error.0
    }
}

/// Conversion from the general failure type into an operation's declared
/// failure type.
pub trait Narrow: Sized {
    fn narrow(operation: &'static str, error: Error) -> Self;
}

impl Narrow for Error {
    fn narrow(_operation: &'static str, error: Error) -> Self {
        error
    }
}

impl Narrow for ClientInfoError {
    /// Client-info connectivity failures pass unchanged; other connectivity
    /// failures become [`Error::Unsupported`] carrying the original.
    fn narrow(operation: &'static str, error: Error) -> Self {
        let assignable = match &error {
            Error::Sql(sql) => sql.kind() == SqlErrorKind::ClientInfo,
            _ => true,
        };
        if assignable {
            Self(error)
        } else {
            Self(Error::unsupported(operation, error))
        }
    }
}
