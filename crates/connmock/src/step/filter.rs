//! Typed result transforms.

use std::fmt;
use std::sync::Arc;

use connmock_api::Result;

use crate::datum::{Datum, FromDatum, IntoDatum};

type Transform = dyn Fn(Datum) -> Result<Datum> + Send + Sync;

/// A transform applied to a delegate's result.
#[derive(Clone)]
pub struct Filter {
    transform: Arc<Transform>,
}

impl Filter {
    /// Filter over results of type `T`; other result types fail with a type
    /// mismatch.
    pub fn new<T, F>(transform: F) -> Self
    where
        T: FromDatum + IntoDatum + 'static,
        F: Fn(T) -> Result<T> + Send + Sync + 'static,
    {
        Self::from_fn(move |datum| transform(T::from_datum(datum)?).map(IntoDatum::into_datum))
    }

    /// Filter over untyped results.
    pub fn from_fn<F>(transform: F) -> Self
    where
        F: Fn(Datum) -> Result<Datum> + Send + Sync + 'static,
    {
        Self {
            transform: Arc::new(transform),
        }
    }

    pub fn identity() -> Self {
        Self::from_fn(|datum| Ok(datum))
    }

    /// `self`, then `after`.
    pub fn and_then(&self, after: &Filter) -> Filter {
        let (first, second) = (self.clone(), after.clone());
        Self::from_fn(move |datum| second.apply(first.apply(datum)?))
    }

    /// `before`, then `self`.
    pub fn compose(&self, before: &Filter) -> Filter {
        before.and_then(self)
    }

    pub fn apply(&self, datum: Datum) -> Result<Datum> {
        (self.transform)(datum)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter")
    }
}
