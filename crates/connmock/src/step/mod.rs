//! Steps: the unit of scripted behavior applied to one intercepted call.
//!
//! A step sees the intercepted call only as a thunk. Value-shaped calls go
//! through [`Step::apply_value`], void-shaped calls through
//! [`Step::apply_void`]. Each variant supports at least one of the two; asking
//! a variant for the shape it cannot produce is a [`UsageError`], never a
//! connectivity failure.

mod filter;
mod wrap;

pub use filter::Filter;
pub use wrap::WrapStep;

use std::fmt;
use std::sync::Arc;

use connmock_api::{Error, Result, UsageError};

use crate::auto_wrap::AutoWrapSupplier;
use crate::datum::{Datum, FromDatum, IntoDatum};
use crate::program::Steps;

type SupplyFn = dyn Fn() -> Result<Datum> + Send + Sync;
type ActionFn = dyn Fn() -> Result<()> + Send + Sync;

/// One scripted behavior. Immutable and cheap to clone.
#[derive(Clone, Default)]
pub enum Step {
    /// Call the delegate; return or fail exactly as it does.
    #[default]
    PassThrough,
    /// Fail with this instance, from both shapes, without calling the delegate.
    Exception(Error),
    /// Return this value without calling the delegate; void calls do nothing.
    Constant(Datum),
    /// Return whatever the function produces, ignoring the delegate.
    Supplied(Arc<SupplyFn>),
    /// Run the function instead of a void call.
    Action(Arc<ActionFn>),
    /// Call the delegate and transform its result.
    Filter(Filter),
    /// Call the delegate and proxy its result over a nested program.
    Wrap(WrapStep),
    /// Call the delegate and proxy any connectivity object it returns with
    /// the shared auto-wrap supplier. Void calls pass through.
    AutoWrap,
}

impl Step {
    pub fn pass_through() -> Step {
        Step::PassThrough
    }

    pub fn fail(error: impl Into<Error>) -> Step {
        Step::Exception(error.into())
    }

    pub fn constant(value: impl IntoDatum) -> Step {
        Step::Constant(value.into_datum())
    }

    pub fn supplied<T, F>(supply: F) -> Step
    where
        T: IntoDatum + 'static,
        F: Fn() -> Result<T> + Send + Sync + 'static,
    {
        Step::Supplied(Arc::new(move || supply().map(IntoDatum::into_datum)))
    }

    pub fn action<F>(action: F) -> Step
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        Step::Action(Arc::new(action))
    }

    /// Filter step over results of type `T`.
    pub fn filter<T, F>(transform: F) -> Step
    where
        T: FromDatum + IntoDatum + 'static,
        F: Fn(T) -> Result<T> + Send + Sync + 'static,
    {
        Step::Filter(Filter::new(transform))
    }

    /// Wrap step: `wrap(result, program over steps)`. The constructor has the
    /// same shape as [`Proxied::wrap`](crate::proxy::Proxied::wrap).
    pub fn wrap<T, F>(wrap: F, steps: impl Into<Arc<[Step]>>) -> Step
    where
        T: connmock_api::ApiType + ?Sized,
        F: Fn(Arc<T>, Steps) -> Arc<T> + Send + Sync + 'static,
    {
        Step::Wrap(WrapStep::new(wrap, steps))
    }

    /// Wrap step using the standard proxy for `T`.
    pub fn wrap_proxy<T>(steps: impl Into<Arc<[Step]>>) -> Step
    where
        T: crate::proxy::Proxied + ?Sized,
    {
        Step::wrap::<T, _>(T::wrap, steps)
    }

    /// Applies this step to a value-shaped call.
    pub fn apply_value<F>(&self, call: F) -> Result<Datum>
    where
        F: FnOnce() -> Result<Datum>,
    {
        match self {
            Step::PassThrough => call(),
            Step::Exception(error) => Err(error.clone()),
            Step::Constant(value) => Ok(value.clone()),
            Step::Supplied(supply) => supply(),
            Step::Action(_) => Err(UsageError::ActionHasNoValue.into()),
            Step::Filter(filter) => filter.apply(call()?),
            Step::Wrap(wrap) => wrap.apply(call()?),
            Step::AutoWrap => call().map(AutoWrapSupplier::rewrap),
        }
    }

    /// Applies this step to a void-shaped call.
    pub fn apply_void<F>(&self, call: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        match self {
            Step::PassThrough | Step::AutoWrap => call(),
            Step::Exception(error) => Err(error.clone()),
            Step::Constant(_) => Ok(()),
            Step::Supplied(_) => Err(UsageError::SuppliedForVoid.into()),
            Step::Action(action) => action(),
            Step::Filter(_) => Err(UsageError::VoidNotFiltered.into()),
            Step::Wrap(_) => Err(UsageError::VoidNotWrappable.into()),
        }
    }

    /// Typed form of [`apply_value`](Self::apply_value).
    pub fn apply<T, F>(&self, call: F) -> Result<T>
    where
        T: IntoDatum + FromDatum,
        F: FnOnce() -> Result<T>,
    {
        self.apply_value(|| call().map(IntoDatum::into_datum))
            .and_then(T::from_datum)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::PassThrough => f.write_str("PassThrough"),
            Step::Exception(e) => write!(f, "Exception: {e}"),
            Step::Constant(v) => write!(f, "Constant: {v}"),
            Step::Supplied(_) => f.write_str("Supplied"),
            Step::Action(_) => f.write_str("Action"),
            Step::Filter(_) => f.write_str("Filter"),
            Step::Wrap(w) => write!(f, "Wrap: {w}"),
            Step::AutoWrap => f.write_str("AutoWrap"),
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use connmock_api::{RuntimeFailure, SqlError};

    use super::*;

    fn unreachable_value() -> Result<Datum> {
        panic!("delegate must not be called")
    }

    fn unreachable_void() -> Result<()> {
        panic!("delegate must not be called")
    }

    #[test]
    fn pass_through_returns_delegate_result() {
        let step = Step::PassThrough;
        assert_eq!(step.apply(|| Ok(7_i32)).unwrap(), 7);
        let err = Error::from(SqlError::new("down"));
        let got = step.apply::<i32, _>(|| Err(err.clone())).unwrap_err();
        assert!(got.ptr_eq(&err));

        let called = Cell::new(false);
        step.apply_void(|| {
            called.set(true);
            Ok(())
        })
        .unwrap();
        assert!(called.get());
    }

    #[test]
    fn exception_fails_with_the_same_instance() {
        for error in [
            Error::from(SqlError::with_code("refused", "08001", 12520)),
            Error::from(RuntimeFailure::msg("illegal state")),
        ] {
            let step = Step::fail(error.clone());
            assert!(step.apply_value(unreachable_value).unwrap_err().ptr_eq(&error));
            assert!(step.apply_void(unreachable_void).unwrap_err().ptr_eq(&error));
        }
    }

    #[test]
    fn constant_never_calls_delegate() {
        let step = Step::constant("fixed".to_string());
        assert_eq!(
            step.apply_value(unreachable_value).unwrap(),
            Datum::Text("fixed".into())
        );
        step.apply_void(unreachable_void).unwrap();
        assert_eq!(step.to_string(), "Constant: \"fixed\"");
    }

    #[test]
    fn supplied_is_called_each_time() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let step = Step::supplied(move || Ok(seen.fetch_add(1, Ordering::SeqCst) as i64));
        assert_eq!(step.apply::<i64, _>(|| unreachable!()).unwrap(), 0);
        assert_eq!(step.apply::<i64, _>(|| unreachable!()).unwrap(), 1);
        assert_eq!(
            step.apply_void(unreachable_void).unwrap_err().as_usage(),
            Some(&UsageError::SuppliedForVoid)
        );
    }

    #[test]
    fn supplied_failures_propagate() {
        let error = Error::from(SqlError::new("supplier failed"));
        let thrown = error.clone();
        let step = Step::supplied::<i32, _>(move || Err(thrown.clone()));
        assert!(step.apply_value(unreachable_value).unwrap_err().ptr_eq(&error));
    }

    #[test]
    fn action_runs_for_void_only() {
        let ran = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ran);
        let step = Step::action(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        step.apply_void(unreachable_void).unwrap();
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert_eq!(
            step.apply_value(unreachable_value).unwrap_err().as_usage(),
            Some(&UsageError::ActionHasNoValue)
        );
    }

    #[test]
    fn filter_transforms_delegate_result() {
        let step = Step::filter(|n: i32| Ok(n * 2));
        assert_eq!(step.apply(|| Ok(21_i32)).unwrap(), 42);
        assert_eq!(
            step.apply_void(unreachable_void).unwrap_err().as_usage(),
            Some(&UsageError::VoidNotFiltered)
        );
    }

    #[test]
    fn filter_reports_type_mismatch() {
        let step = Step::filter(|n: i32| Ok(n + 1));
        let err = step.apply(|| Ok("text".to_string())).unwrap_err();
        assert_eq!(
            err.as_usage(),
            Some(&UsageError::TypeMismatch {
                expected: "i32",
                found: "String"
            })
        );
    }

    #[test]
    fn display_names_variants() {
        assert_eq!(Step::PassThrough.to_string(), "PassThrough");
        assert_eq!(Step::AutoWrap.to_string(), "AutoWrap");
        assert_eq!(
            Step::fail(SqlError::new("x")).to_string(),
            "Exception: x"
        );
        assert_eq!(Step::action(|| Ok(())).to_string(), "Action");
    }
}
