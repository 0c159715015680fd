//! Property-based tests for programs and steps.
//!
//! For any authored program:
//! 1. `next_step` yields the authored steps in order, then pass-through forever.
//! 2. Inspection never sees the pass-through tail.
//! 3. A proxy driven by the program consumes exactly one step per call.

use std::sync::Arc;

use proptest::prelude::*;

use connmock::{Program, Step, StepSupplier};
use connmock_api::{Connection, SqlError};

// =============================================================================
// Strategy helpers
// =============================================================================

/// Steps that can be compared by their display form.
fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::pass_through()),
        any::<i64>().prop_map(|n| Step::constant(n)),
        "[a-z]{1,8}".prop_map(|s| Step::constant(s)),
        "[a-z ]{1,12}".prop_map(|m| Step::fail(SqlError::new(m))),
    ]
}

fn program_strategy(max_len: usize) -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(step_strategy(), 0..=max_len)
}

fn labels<'a>(steps: impl IntoIterator<Item = &'a Step>) -> Vec<String> {
    steps.into_iter().map(ToString::to_string).collect()
}

// =============================================================================
// Order and tail
// =============================================================================
proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn authored_steps_come_first_then_pass_through(
        steps in program_strategy(16),
        extra in 0usize..32,
    ) {
        let expected = labels(&steps);
        let program = Program::new(steps);

        let handed: Vec<String> = (0..expected.len())
            .map(|_| program.next_step().to_string())
            .collect();
        prop_assert_eq!(handed, expected);

        for _ in 0..extra {
            prop_assert!(matches!(program.next_step(), Step::PassThrough));
        }
        prop_assert!(program.is_exhausted());
    }

    #[test]
    fn inspection_sees_only_authored_steps(
        steps in program_strategy(16),
        calls in 0usize..48,
    ) {
        let expected = labels(&steps);
        let program = Program::new(steps);
        for _ in 0..calls {
            let _ = program.next_step();
        }
        prop_assert_eq!(program.len(), expected.len());
        prop_assert_eq!(labels(&program), expected);
        prop_assert_eq!(program.position(), calls);
    }
}

// =============================================================================
// Proxies consume one step per call
// =============================================================================
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn each_proxied_call_consumes_one_step(
        steps in program_strategy(8),
        calls in 0usize..16,
    ) {
        let program = Arc::new(Program::new(steps));
        let connection = connmock::wrap::<dyn Connection>(
            connmock::noop::NoopConnection::shared(),
            program.clone(),
        );
        for _ in 0..calls {
            // Outcomes vary with the step; only the count matters here.
            let _ = connection.rollback();
        }
        prop_assert_eq!(program.position(), calls);
    }
}
