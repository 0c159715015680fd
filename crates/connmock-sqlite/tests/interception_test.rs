//! Interception over a real backend: connmock proxies in front of SQLite.

use std::sync::Arc;

use connmock::{
    AutoWrapSupplier, ConnectionWrap, DatabaseMetaDataWrap, PreparedStatementWrap,
    ResultSetMetaDataWrap, ResultSetWrap, Step, StatementWrap,
};
use connmock_api::{
    Connection, DatabaseMetaData, PreparedStatement, ResultSet, SqlError, Statement,
};
use connmock_sqlite::SqliteDriver;

const URL: &str = "jdbc:mock:sqlite::memory:";

// ─── Helpers ───────────────────────────────────────────────────────────────

fn connect() -> Arc<dyn Connection> {
    connmock::registry().register(Arc::new(SqliteDriver::new()));
    connmock::registry().connect(URL, None).unwrap()
}

fn count(connection: &dyn Connection) -> i64 {
    let rs = connection
        .create_statement()
        .unwrap()
        .execute_query("SELECT count(*) FROM t")
        .unwrap();
    assert!(rs.next().unwrap());
    rs.get_long(1).unwrap()
}

// ─── Auto-wrap ─────────────────────────────────────────────────────────────

#[test]
fn auto_wrap_proxies_a_real_session() {
    connmock::set_steps(AutoWrapSupplier::shared());
    let connection = connect();
    let proxy = ConnectionWrap::of(&*connection).unwrap();
    assert_eq!(proxy.delegate().metadata().unwrap().product_name().unwrap(), "SQLite");

    let statement = connection.create_statement().unwrap();
    assert!(StatementWrap::of(&*statement).is_some());
    statement
        .execute_update("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)")
        .unwrap();

    let insert = connection
        .prepare_statement("INSERT INTO t (name) VALUES (?)")
        .unwrap();
    assert!(PreparedStatementWrap::of(&*insert).is_some());
    for name in ["ada", "alan"] {
        insert.set_string(1, name).unwrap();
        assert_eq!(insert.execute_prepared_update().unwrap(), 1);
    }

    let rs = statement.execute_query("SELECT name FROM t ORDER BY id").unwrap();
    assert!(ResultSetWrap::of(&*rs).is_some());
    assert!(ResultSetMetaDataWrap::of(&*rs.metadata().unwrap()).is_some());
    let owner = rs.statement().unwrap().unwrap();
    assert!(StatementWrap::of(&*owner).is_some());

    let mut names = Vec::new();
    while rs.next().unwrap() {
        names.extend(rs.get_string(1).unwrap());
    }
    assert_eq!(names, ["ada", "alan"]);

    let metadata = connection.metadata().unwrap();
    assert!(DatabaseMetaDataWrap::of(&*metadata).is_some());
    let tables = metadata.tables(None).unwrap();
    assert!(ResultSetWrap::of(&*tables).is_some());
    assert!(tables.next().unwrap());
    assert_eq!(tables.get_string(1).unwrap().as_deref(), Some("t"));
    connmock::clear();
}

#[test]
fn auto_wrap_keeps_backend_failures() {
    connmock::set_steps(AutoWrapSupplier::shared());
    let connection = connect();
    let err = connection.prepare_statement("SELEC 1").unwrap_err();
    assert_eq!(err.sql_state(), Some("HY000"));
    connmock::clear();
}

// ─── Scripted programs ─────────────────────────────────────────────────────

#[test]
fn scripted_failure_then_real_work() {
    let refused = SqlError::with_state("database is locked", "HY000");
    connmock::set_program(vec![Step::fail(refused.clone())]);

    connmock::registry().register(Arc::new(SqliteDriver::new()));
    let err = connmock::registry().connect(URL, None).unwrap_err();
    assert!(err.as_sql().is_some_and(|e| e.ptr_eq(&refused)));

    let connection = connmock::registry().connect(URL, None).unwrap();
    assert!(ConnectionWrap::of(&*connection).is_none());
    assert!(connection.is_valid(1).unwrap());
    connmock::clear();
}

#[test]
fn failure_lands_between_real_calls() {
    let broken = SqlError::with_state("connection reset", "08006");
    connmock::set_program(vec![Step::wrap_proxy::<dyn Connection>(vec![
        Step::pass_through(),
        Step::fail(broken.clone()),
    ])]);
    let connection = connect();

    connection
        .create_statement()
        .unwrap()
        .execute_update("CREATE TABLE t (x INTEGER)")
        .unwrap();
    let err = connection.prepare_statement("INSERT INTO t VALUES (1)").unwrap_err();
    assert!(err.as_sql().is_some_and(|e| e.ptr_eq(&broken)));

    let insert = connection.prepare_statement("INSERT INTO t VALUES (1)").unwrap();
    assert_eq!(insert.execute_prepared_update().unwrap(), 1);
    assert_eq!(count(&*connection), 1);
    connmock::clear();
}

#[test]
fn filters_see_real_results() {
    connmock::set_program(vec![Step::wrap_proxy::<dyn Connection>(vec![
        Step::wrap_proxy::<dyn Statement>(vec![
            Step::pass_through(),
            Step::filter(|changed: i64| Ok(changed * 10)),
        ]),
    ])]);
    let connection = connect();
    let statement = connection.create_statement().unwrap();

    statement.execute_update("CREATE TABLE t (x INTEGER)").unwrap();
    let reported = statement
        .execute_update("INSERT INTO t VALUES (1), (2)")
        .unwrap();
    assert_eq!(reported, 20);
    assert_eq!(count(&*connection), 2);
    connmock::clear();
}
