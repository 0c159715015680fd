//! SQLite backend behavior through the connectivity API.

use std::sync::Arc;

use connmock_api::{
    Connection, Driver, Handle, Interface, PreparedStatement, Properties, ResultSet, SqlErrorKind,
    SqlValue, Statement,
};
use connmock_sqlite::SqliteDriver;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn memory() -> Arc<dyn Connection> {
    SqliteDriver::new()
        .connect("jdbc:sqlite::memory:", None)
        .unwrap()
        .unwrap()
}

fn with_people() -> Arc<dyn Connection> {
    let connection = memory();
    let statement = connection.create_statement().unwrap();
    statement
        .execute_update("CREATE TABLE people (id INTEGER PRIMARY KEY, name TEXT, score REAL)")
        .unwrap();
    statement.add_batch("INSERT INTO people (name, score) VALUES ('ada', 9.5)").unwrap();
    statement.add_batch("INSERT INTO people (name, score) VALUES ('alan', NULL)").unwrap();
    assert_eq!(statement.execute_batch().unwrap(), vec![1, 1]);
    connection
}

fn count(connection: &Arc<dyn Connection>) -> i64 {
    let rs = connection
        .create_statement()
        .unwrap()
        .execute_query("SELECT count(*) FROM people")
        .unwrap();
    assert!(rs.next().unwrap());
    rs.get_long(1).unwrap()
}

// ─── Statements ────────────────────────────────────────────────────────────

#[test]
fn query_reads_rows_and_metadata() {
    let connection = with_people();
    let rs = connection
        .create_statement()
        .unwrap()
        .execute_query("SELECT id, name, score FROM people ORDER BY id")
        .unwrap();

    let md = rs.metadata().unwrap();
    assert_eq!(md.column_count().unwrap(), 3);
    assert_eq!(md.column_name(2).unwrap(), "name");
    assert_eq!(md.column_type_name(3).unwrap(), "REAL");

    assert!(rs.next().unwrap());
    assert_eq!(rs.get_string(2).unwrap().as_deref(), Some("ada"));
    assert_eq!(rs.get_double(3).unwrap(), 9.5);
    assert!(rs.next().unwrap());
    assert_eq!(rs.get_value(3).unwrap(), SqlValue::Null);
    assert!(rs.was_null().unwrap());
    assert!(!rs.next().unwrap());
}

#[test]
fn execute_reports_the_kind_of_result() {
    let connection = with_people();
    let statement = connection.create_statement().unwrap();

    assert!(statement.execute("SELECT name FROM people").unwrap());
    assert!(statement.result_set().unwrap().is_some());
    assert_eq!(statement.update_count().unwrap(), -1);

    assert!(!statement.execute("UPDATE people SET score = 1").unwrap());
    assert!(statement.result_set().unwrap().is_none());
    assert_eq!(statement.update_count().unwrap(), 2);
}

#[test]
fn max_rows_limits_results() {
    let connection = with_people();
    let statement = connection.create_statement().unwrap();
    statement.set_max_rows(1).unwrap();
    let rs = statement.execute_query("SELECT name FROM people").unwrap();
    assert!(rs.next().unwrap());
    assert!(!rs.next().unwrap());
}

#[test]
fn result_set_knows_its_statement() {
    let connection = with_people();
    let statement = connection.create_statement().unwrap();
    let rs = statement.execute_query("SELECT 1").unwrap();
    let owner = rs.statement().unwrap().unwrap();
    assert_eq!(owner.identity(), statement.identity());
}

#[test]
fn prepared_statements_bind_positional_parameters() {
    let connection = with_people();
    let insert = connection
        .prepare_statement("INSERT INTO people (name, score) VALUES (?1, ?2)")
        .unwrap();
    assert_eq!(insert.interface(), Interface::PreparedStatement);
    insert.set_string(1, "grace").unwrap();
    insert.set_double(2, 7.0).unwrap();
    assert_eq!(insert.execute_prepared_update().unwrap(), 1);

    let pm = insert.parameter_metadata().unwrap();
    assert_eq!(pm.parameter_count().unwrap(), 2);
    assert_eq!(pm.parameter_type_name(1).unwrap(), "TEXT");
    assert!(insert.set_int(3, 1).is_err());
    assert!(insert.result_metadata().unwrap().is_none());

    let select = connection
        .prepare_statement("SELECT score FROM people WHERE name = ?")
        .unwrap();
    select.set_value(1, SqlValue::from("grace")).unwrap();
    let rs = select.execute_prepared_query().unwrap();
    assert!(rs.next().unwrap());
    assert_eq!(rs.get_double(1).unwrap(), 7.0);
    assert_eq!(select.result_metadata().unwrap().unwrap().column_count().unwrap(), 1);
}

#[test]
fn unbound_parameters_are_null() {
    let connection = memory();
    let select = connection.prepare_statement("SELECT ? IS NULL").unwrap();
    let rs = select.execute_prepared_query().unwrap();
    assert!(rs.next().unwrap());
    assert_eq!(rs.get_int(1).unwrap(), 1);
}

#[test]
fn bad_sql_fails_with_sqlite_code() {
    let connection = memory();
    let err = connection.prepare_statement("SELEC 1").unwrap_err();
    assert_eq!(err.sql_state(), Some("HY000"));
}

// ─── Transactions ──────────────────────────────────────────────────────────

#[test]
fn rollback_discards_uncommitted_work() {
    let connection = with_people();
    connection.set_auto_commit(false).unwrap();
    let statement = connection.create_statement().unwrap();
    statement.execute_update("DELETE FROM people").unwrap();
    assert_eq!(count(&connection), 0);
    connection.rollback().unwrap();
    assert_eq!(count(&connection), 2);

    statement.execute_update("DELETE FROM people WHERE name = 'ada'").unwrap();
    connection.commit().unwrap();
    connection.set_auto_commit(true).unwrap();
    assert_eq!(count(&connection), 1);
}

#[test]
fn read_only_blocks_writes() {
    let connection = with_people();
    connection.set_read_only(true).unwrap();
    assert!(connection.is_read_only().unwrap());
    let statement = connection.create_statement().unwrap();
    assert!(statement.execute_update("DELETE FROM people").is_err());
    connection.set_read_only(false).unwrap();
    assert_eq!(statement.execute_update("DELETE FROM people").unwrap(), 2);
}

// ─── Connection surface ────────────────────────────────────────────────────

#[test]
fn metadata_lists_tables() {
    let connection = with_people();
    let md = connection.metadata().unwrap();
    assert_eq!(md.product_name().unwrap(), "SQLite");
    assert_eq!(md.url().unwrap(), "jdbc:sqlite::memory:");
    assert!(!md.supports_savepoints().unwrap());

    let tables = md.tables(None).unwrap();
    assert!(tables.next().unwrap());
    let column = tables.find_column("table_name").unwrap();
    assert_eq!(tables.get_string(column).unwrap().as_deref(), Some("people"));
    assert!(!tables.next().unwrap());
}

#[test]
fn user_comes_from_properties() {
    let info = Properties::new().with("user", "scott").with("password", "tiger");
    let connection = SqliteDriver::new()
        .connect("jdbc:sqlite:mem:", Some(&info))
        .unwrap()
        .unwrap();
    assert_eq!(
        connection.metadata().unwrap().user_name().unwrap().as_deref(),
        Some("scott")
    );
}

#[test]
fn client_info_round_trips() {
    let connection = memory();
    connection.set_client_info("ApplicationName", "tests").unwrap();
    assert_eq!(
        connection.client_info("ApplicationName").unwrap().as_deref(),
        Some("tests")
    );
    assert!(connection.client_info("missing").unwrap().is_none());
}

#[test]
fn unsupported_features_say_so() {
    let connection = memory();
    for err in [
        connection.set_savepoint(None).map(|_| ()).unwrap_err(),
        connection.create_blob().map(|_| ()).unwrap_err(),
        connection.create_nclob().map(|_| ()).unwrap_err(),
        connection.prepare_call("{call p}").map(|_| ()).unwrap_err(),
    ] {
        assert_eq!(err.as_sql().unwrap().kind(), SqlErrorKind::FeatureNotSupported);
    }
}

#[test]
fn closed_connections_reject_work() {
    let connection = memory();
    let statement = connection.create_statement().unwrap();
    connection.close().unwrap();
    assert!(connection.is_closed().unwrap());
    assert!(!connection.is_valid(1).unwrap());
    let err = statement.execute_query("SELECT 1").unwrap_err();
    assert_eq!(err.sql_state(), Some("08003"));
    connection.close().unwrap();
}

#[test]
fn file_databases_persist() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("jdbc:sqlite:{}", dir.path().join("people.db").display());
    let driver = SqliteDriver::new();

    let first = driver.connect(&url, None).unwrap().unwrap();
    first
        .create_statement()
        .unwrap()
        .execute_update("CREATE TABLE t (x INTEGER)")
        .unwrap();
    first.close().unwrap();

    let second = driver.connect(&url, None).unwrap().unwrap();
    let tables = second.metadata().unwrap().tables(Some("t")).unwrap();
    assert!(tables.next().unwrap());
}
