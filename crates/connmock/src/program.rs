//! Step suppliers and the finite [`Program`].

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::step::Step;

/// Hands out the step for the next intercepted call.
pub trait StepSupplier: Send + Sync + fmt::Debug {
    fn next_step(&self) -> Step;
}

/// What every proxy holds.
pub type Steps = Arc<dyn StepSupplier>;

impl<T: StepSupplier + ?Sized> StepSupplier for Arc<T> {
    fn next_step(&self) -> Step {
        (**self).next_step()
    }
}

/// Authored steps followed by an endless run of [`Step::PassThrough`].
///
/// `next_step` advances a cursor and never runs dry. Inspection through
/// [`iter`](Program::iter), [`len`](Program::len) or `&Program` iteration sees
/// only the authored steps, never the pass-through tail.
///
/// The authored steps are immutable and shared. The cursor is atomic, so a
/// program may be shared between threads without data races, but the order in
/// which concurrent callers receive steps is then unspecified. Give each
/// thread its own program.
pub struct Program {
    steps: Arc<[Step]>,
    cursor: AtomicUsize,
}

impl Program {
    pub fn new(steps: impl Into<Arc<[Step]>>) -> Self {
        Self {
            steps: steps.into(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// A program that passes every call through.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Shared supplier over `steps`.
    pub fn shared(steps: impl Into<Arc<[Step]>>) -> Steps {
        Arc::new(Self::new(steps))
    }

    /// Same authored steps with a fresh cursor.
    pub fn restart(&self) -> Program {
        Program::new(Arc::clone(&self.steps))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Number of steps handed out so far, including pass-through tail steps.
    pub fn position(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// True once every authored step has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.position() >= self.steps.len()
    }
}

impl StepSupplier for Program {
    fn next_step(&self) -> Step {
        let at = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| Some(n.saturating_add(1)))
            .unwrap_or_else(|n| n);
        self.steps.get(at).cloned().unwrap_or_default()
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Step>> for Program {
    fn from(steps: Vec<Step>) -> Self {
        Self::new(steps)
    }
}

impl FromIterator<Step> for Program {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("steps", &self.steps)
            .field("position", &self.position())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use connmock_api::SqlError;

    use super::*;

    #[test]
    fn yields_authored_steps_then_pass_through() {
        let program = Program::new(vec![Step::constant(1_i32), Step::fail(SqlError::new("x"))]);
        assert!(matches!(program.next_step(), Step::Constant(_)));
        assert!(matches!(program.next_step(), Step::Exception(_)));
        for _ in 0..10 {
            assert!(matches!(program.next_step(), Step::PassThrough));
        }
        assert_eq!(program.position(), 12);
        assert!(program.is_exhausted());
    }

    #[test]
    fn iteration_sees_only_authored_steps() {
        let program = Program::new(vec![Step::constant(1_i32)]);
        let _ = program.next_step();
        let _ = program.next_step();
        assert_eq!(program.iter().count(), 1);
        assert_eq!((&program).into_iter().count(), 1);
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn empty_program_passes_through() {
        let program = Program::empty();
        assert!(program.is_empty());
        assert!(matches!(program.next_step(), Step::PassThrough));
    }

    #[test]
    fn restart_has_a_fresh_cursor() {
        let program: Program = vec![Step::constant(1_i32), Step::constant(2_i32)].into();
        let _ = program.next_step();
        let again = program.restart();
        assert_eq!(again.position(), 0);
        assert!(matches!(again.next_step(), Step::Constant(_)));
        assert_eq!(program.position(), 1);
    }
}
