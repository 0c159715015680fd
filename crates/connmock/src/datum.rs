//! Type-erased values crossing a step.
//!
//! Steps do not know the static type of the call they intercept, so every
//! result travels as a [`Datum`] tagged with its runtime type. Converting back
//! to the caller's type is explicit and reports a
//! [`UsageError::TypeMismatch`] instead of panicking.

use std::fmt;
use std::sync::Arc;

use connmock_api::{ApiObject, ApiType, Error, Result, SqlValue, UsageError};

/// A value produced by an intercepted call.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Text(String),
    Bytes(Vec<u8>),
    Longs(Vec<i64>),
    Value(SqlValue),
    Object(ApiObject),
}

impl Datum {
    /// Runtime type tag, used in mismatch reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            Datum::Null => "null",
            Datum::Bool(_) => "bool",
            Datum::Int(_) => "i32",
            Datum::Long(_) => "i64",
            Datum::Double(_) => "f64",
            Datum::Text(_) => "String",
            Datum::Bytes(_) => "bytes",
            Datum::Longs(_) => "Vec<i64>",
            Datum::Value(_) => "SqlValue",
            Datum::Object(o) => o.interface().name(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    pub fn as_object(&self) -> Option<&ApiObject> {
        match self {
            Datum::Object(o) => Some(o),
            _ => None,
        }
    }

    fn mismatch<T: FromDatum>(&self) -> Error {
        UsageError::TypeMismatch {
            expected: T::expected(),
            found: self.type_name(),
        }
        .into()
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null => f.write_str("null"),
            Datum::Bool(b) => write!(f, "{b}"),
            Datum::Int(i) => write!(f, "{i}"),
            Datum::Long(l) => write!(f, "{l}"),
            Datum::Double(d) => write!(f, "{d}"),
            Datum::Text(t) => write!(f, "{t:?}"),
            Datum::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Datum::Longs(l) => write!(f, "{l:?}"),
            Datum::Value(v) => write!(f, "{v}"),
            Datum::Object(o) => write!(f, "{o:?}"),
        }
    }
}

/// Conversion of a call result into a [`Datum`].
pub trait IntoDatum {
    fn into_datum(self) -> Datum;
}

/// Checked conversion of a [`Datum`] back into a call's result type.
pub trait FromDatum: Sized {
    /// Type name reported on mismatch.
    fn expected() -> &'static str;

    fn from_datum(datum: Datum) -> Result<Self>;
}

impl IntoDatum for Datum {
    fn into_datum(self) -> Datum {
        self
    }
}

impl FromDatum for Datum {
    fn expected() -> &'static str {
        "any"
    }

    fn from_datum(datum: Datum) -> Result<Self> {
        Ok(datum)
    }
}

macro_rules! plain_datum {
    ($($ty:ty => $variant:ident, $name:literal;)*) => {$(
        impl IntoDatum for $ty {
            fn into_datum(self) -> Datum {
                Datum::$variant(self)
            }
        }

        impl FromDatum for $ty {
            fn expected() -> &'static str {
                $name
            }

            fn from_datum(datum: Datum) -> Result<Self> {
                match datum {
                    Datum::$variant(v) => Ok(v),
                    other => Err(other.mismatch::<Self>()),
                }
            }
        }
    )*};
}

plain_datum! {
    bool => Bool, "bool";
    i32 => Int, "i32";
    f64 => Double, "f64";
    String => Text, "String";
    Vec<u8> => Bytes, "bytes";
    Vec<i64> => Longs, "Vec<i64>";
    SqlValue => Value, "SqlValue";
    ApiObject => Object, "object";
}

impl IntoDatum for i64 {
    fn into_datum(self) -> Datum {
        Datum::Long(self)
    }
}

impl FromDatum for i64 {
    fn expected() -> &'static str {
        "i64"
    }

    /// Widens `i32`.
    fn from_datum(datum: Datum) -> Result<Self> {
        match datum {
            Datum::Long(v) => Ok(v),
            Datum::Int(v) => Ok(v.into()),
            other => Err(other.mismatch::<Self>()),
        }
    }
}

impl IntoDatum for usize {
    fn into_datum(self) -> Datum {
        Datum::Long(i64::try_from(self).unwrap_or(i64::MAX))
    }
}

impl FromDatum for usize {
    fn expected() -> &'static str {
        "usize"
    }

    fn from_datum(datum: Datum) -> Result<Self> {
        let narrowed = match &datum {
            Datum::Long(v) => usize::try_from(*v).ok(),
            Datum::Int(v) => usize::try_from(*v).ok(),
            _ => None,
        };
        narrowed.ok_or_else(|| datum.mismatch::<Self>())
    }
}

impl<T: ApiType + ?Sized> IntoDatum for Arc<T> {
    fn into_datum(self) -> Datum {
        Datum::Object(connmock_api::Handle::into_object(self))
    }
}

impl<T: ApiType + ?Sized> FromDatum for Arc<T> {
    fn expected() -> &'static str {
        T::INTERFACE.name()
    }

    fn from_datum(datum: Datum) -> Result<Self> {
        match datum {
            Datum::Object(object) => T::from_object(object)
                .map_err(|back| Datum::Object(back).mismatch::<Self>()),
            other => Err(other.mismatch::<Self>()),
        }
    }
}

impl<T: IntoDatum> IntoDatum for Option<T> {
    fn into_datum(self) -> Datum {
        self.map_or(Datum::Null, IntoDatum::into_datum)
    }
}

impl<T: FromDatum> FromDatum for Option<T> {
    fn expected() -> &'static str {
        T::expected()
    }

    fn from_datum(datum: Datum) -> Result<Self> {
        match datum {
            Datum::Null => Ok(None),
            other => T::from_datum(other).map(Some),
        }
    }
}
