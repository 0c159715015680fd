//! Proxy behavior: identity, auto-wrapping, interface queries, filters and
//! the trace log contract.

use std::collections::HashSet;
use std::io::Write;
use std::sync::{Arc, Mutex};

use connmock::noop::{NoopConnection, NoopStatement, StatementKind};
use connmock::{
    AutoWrapSupplier, CallableStatementWrap, ConnectionWrap, DatabaseMetaDataWrap, MockConfig,
    MockDriver, PreparedStatementWrap, Program, ResultSetWrap, Step, StatementWrap, WrapTable,
};
use connmock_api::{
    ApiObject, CallableStatement, Connection, Driver, DriverRegistry, Handle, Interface,
    Properties, SqlError, Statement, UsageError,
};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn bare() -> Arc<dyn Connection> {
    NoopConnection::shared()
}

fn proxied(steps: Vec<Step>) -> Arc<dyn Connection> {
    connmock::wrap::<dyn Connection>(bare(), Program::shared(steps))
}

fn auto_wrapped() -> Arc<dyn Connection> {
    connmock::wrap::<dyn Connection>(bare(), AutoWrapSupplier::shared())
}

#[derive(Clone)]
struct TestWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

struct TestWriterGuard {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for TestWriter {
    type Writer = TestWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        TestWriterGuard {
            buffer: self.buffer.clone(),
        }
    }
}

impl Write for TestWriterGuard {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a TRACE subscriber and returns what it logged.
fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt()
        .with_writer(TestWriter {
            buffer: buffer.clone(),
        })
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.lock().expect("log buffer").clone();
    String::from_utf8(bytes).expect("utf8 logs")
}

fn isolated_driver(config: MockConfig) -> MockDriver {
    let registry = Arc::new(DriverRegistry::new());
    registry.register(Arc::new(connmock::NoopDriver::new()));
    MockDriver::new(config).with_registry(registry)
}

// ─── Identity ──────────────────────────────────────────────────────────────

#[test]
fn nested_proxies_equal_the_bare_delegate() {
    let delegate = bare();
    let inner = connmock::wrap::<dyn Connection>(delegate.clone(), Program::shared(Vec::new()));
    let outer = connmock::wrap::<dyn Connection>(inner.clone(), Program::shared(Vec::new()));

    assert!(*outer == *delegate);
    assert!(*inner == *outer);
    assert_eq!(outer.identity(), delegate.identity());

    let objects: HashSet<ApiObject> = [delegate, inner, outer]
        .into_iter()
        .map(Handle::into_object)
        .collect();
    assert_eq!(objects.len(), 1);
}

#[test]
fn identity_and_debug_do_not_consume_steps() {
    let program = Arc::new(Program::new(vec![Step::fail(SqlError::new("first call"))]));
    let proxy = connmock::wrap::<dyn Connection>(bare(), program.clone());

    let _ = proxy.identity();
    let _ = format!("{proxy:?}");
    assert!(*proxy == *bare());
    assert_eq!(program.position(), 0);

    assert!(proxy.commit().is_err());
    assert_eq!(program.position(), 1);
}

// ─── Auto-wrap ─────────────────────────────────────────────────────────────

#[test]
fn auto_wrap_proxies_every_returned_object() {
    let connection = auto_wrapped();

    let statement = connection.create_statement().unwrap();
    assert!(StatementWrap::of(&*statement).is_some());

    let prepared = connection.prepare_statement("select 1").unwrap();
    assert!(PreparedStatementWrap::of(&*prepared).is_some());

    let results = statement.execute_query("select 1").unwrap();
    assert!(ResultSetWrap::of(&*results).is_some());

    let metadata = connection.metadata().unwrap();
    assert!(DatabaseMetaDataWrap::of(&*metadata).is_some());
    let back = metadata.connection().unwrap();
    assert!(ConnectionWrap::of(&*back).is_some());
}

#[test]
fn auto_wrap_picks_the_most_specific_proxy() {
    let call = auto_wrapped().prepare_call("{call p(?)}").unwrap();
    let handle: &dyn Handle = &*call;
    assert!(CallableStatementWrap::of(handle).is_some());
    assert!(PreparedStatementWrap::of(handle).is_none());
    assert!(StatementWrap::of(handle).is_none());
}

#[test]
fn auto_wrap_table_matches_the_runtime_interface() {
    // A callable statement seen through its supertype still gets the
    // callable proxy.
    let statement: Arc<dyn Statement> = NoopStatement::shared(StatementKind::Callable);
    let object = WrapTable::standard().rewrap(statement.into_object(), &AutoWrapSupplier::shared());
    assert_eq!(object.interface(), Interface::CallableStatement);
    assert!(CallableStatementWrap::of(object.handle()).is_some());
    assert!(object.downcast::<dyn CallableStatement>().is_ok());
}

#[test]
fn auto_wrap_passes_plain_values_and_void_calls() {
    let connection = auto_wrapped();
    assert_eq!(connection.native_sql("select 1").unwrap(), "select 1");
    connection.commit().unwrap();
    assert!(connection.client_info("app").unwrap().is_none());
}

// ─── Interface queries ─────────────────────────────────────────────────────

#[test]
fn is_wrapper_for_follows_the_hierarchy() {
    let call = auto_wrapped().prepare_call("{call p}").unwrap();
    assert!(call.is_wrapper_for(Interface::CallableStatement).unwrap());
    assert!(call.is_wrapper_for(Interface::PreparedStatement).unwrap());
    assert!(call.is_wrapper_for(Interface::Statement).unwrap());
    assert!(!call.is_wrapper_for(Interface::Connection).unwrap());
}

#[test]
fn is_wrapper_for_is_scriptable() {
    let connection = proxied(vec![Step::constant(false)]);
    assert!(!connection.is_wrapper_for(Interface::Connection).unwrap());
    assert!(connection.is_wrapper_for(Interface::Connection).unwrap());
}

// ─── Filters, wraps and shapes ─────────────────────────────────────────────

#[test]
fn filter_rewrites_the_delegate_result() {
    let connection = proxied(vec![Step::filter(|sql: String| Ok(sql.to_uppercase()))]);
    assert_eq!(connection.native_sql("select 1").unwrap(), "SELECT 1");
    assert_eq!(connection.native_sql("select 1").unwrap(), "select 1");
}

#[test]
fn filter_on_a_void_call_is_a_usage_error() {
    let connection = proxied(vec![Step::filter(|n: i32| Ok(n))]);
    let err = connection.commit().unwrap_err();
    assert_eq!(err.as_usage(), Some(&UsageError::VoidNotFiltered));
}

#[test]
fn wrap_on_a_void_call_is_a_usage_error() {
    let connection = proxied(vec![Step::wrap_proxy::<dyn Statement>(Vec::new())]);
    let err = connection.rollback().unwrap_err();
    assert_eq!(err.as_usage(), Some(&UsageError::VoidNotWrappable));
}

#[test]
fn constant_of_the_wrong_type_is_reported() {
    let connection = proxied(vec![Step::constant(7_i32)]);
    let err = connection.native_sql("select 1").unwrap_err();
    assert_eq!(
        err.as_usage(),
        Some(&UsageError::TypeMismatch {
            expected: "String",
            found: "i32"
        })
    );
}

#[test]
fn wrap_of_a_null_result_stays_null() {
    let connection = proxied(vec![Step::wrap_proxy::<dyn Statement>(Vec::new())]);
    let statement = connection.create_statement().unwrap();
    let results = connmock::wrap::<dyn Statement>(
        statement,
        Program::shared(vec![Step::wrap_proxy::<dyn connmock_api::ResultSet>(Vec::new())]),
    );
    assert!(results.result_set().unwrap().is_none());
}

// ─── Trace log contract ────────────────────────────────────────────────────

#[test]
fn step_applications_are_traced() {
    let connection = proxied(vec![Step::constant("fixed".to_string())]);
    let logs = capture_logs(|| {
        connection.native_sql("select 1").unwrap();
    });
    assert!(logs.contains("Apply Constant: \"fixed\" to Connection.native_sql(select 1)"));
    assert!(logs.contains("Result: \"fixed\""));
}

#[test]
fn connect_log_hides_credentials() {
    let driver = isolated_driver(MockConfig::default());
    let info = Properties::new().with("user", "scott").with("password", "tiger");
    let logs = capture_logs(|| {
        driver.connect("jdbc:mock:noop:", Some(&info)).unwrap();
    });
    assert!(logs.contains(
        "Apply PassThrough to DriverRegistry::connect(jdbc:noop:,{password=[HIDDEN], user=scott})"
    ));
    assert!(!logs.contains("tiger"));
}

#[test]
fn connect_log_reveals_credentials_on_request() {
    let driver = isolated_driver(MockConfig {
        reveal_credentials: Some(true),
        ..MockConfig::default()
    });
    let info = Properties::new().with("password", "tiger");
    let logs = capture_logs(|| {
        driver.connect("jdbc:mock:noop:", Some(&info)).unwrap();
    });
    assert!(logs.contains("{password=tiger}"));
}

#[test]
fn script_changes_are_logged_at_debug() {
    let driver = isolated_driver(MockConfig::default());
    let logs = capture_logs(|| {
        driver.set_program(vec![Step::pass_through()]);
        driver.clear();
    });
    assert!(logs.contains("install step supplier"));
    assert!(logs.contains("remove step supplier"));
}
