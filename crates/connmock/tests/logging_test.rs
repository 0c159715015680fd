//! Global subscriber installation. Kept in its own test binary so no other
//! test races for the global subscriber.

use connmock::logging;

#[test]
fn subscriber_is_installed_once() {
    assert!(logging::init_for_tests());
    assert!(!logging::init_for_tests());
    assert!(!logging::init("warn"));

    // Proxied calls still work with the global subscriber in place.
    connmock::set_program(vec![connmock::Step::pass_through()]);
    assert!(connmock::registry().connect("jdbc:mock:noop:", None).is_ok());
    connmock::clear();
}
