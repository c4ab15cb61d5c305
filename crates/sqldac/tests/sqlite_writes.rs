//! Insert, update, delete and refresh against an in-memory SQLite database.

use sqldac::prelude::*;
use sqldac::rules::{Length, Required, Unique};
use sqldac_sqlite::SqliteConnection;

fn open(ddl: &str) -> SqliteConnection {
    let db = SqliteConnection::open_memory().expect("open sqlite memory db");
    db.execute_batch(ddl).expect("create schema");
    db
}

fn users_db() -> SqliteConnection {
    open(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER
        )",
    )
}

fn users() -> Table {
    Table::new("users")
        .field(Field::new("id").primary_key().auto_increment())
        .field(Field::new("name").validate(Required).validate(Length::new(1, 20)))
        .field(Field::new("email").title("E-mail").validate_with(Unique::new()))
        .field(
            Field::new("created_at")
                .read_only()
                .default_with(|| Some(Value::now())),
        )
        .field(Field::new("updated_at").on_update_with(|| Some(Value::now())))
}

fn count(db: &SqliteConnection, table: &Table) -> i64 {
    table.count(db, "", &[]).expect("count rows")
}

#[test]
fn insert_refresh_reads_generated_id_and_defaults() {
    let db = users_db();
    let users = users();

    let result = users
        .insert(&db, &Record::from([("name", "a"), ("email", "a@x.com")]))
        .expect("insert user");
    assert_eq!(result.rows_affected(), 1);
    assert_eq!(result.last_insert_id(), Some(1));
    assert!(!result.snapshot().contains("id"));
    assert!(matches!(result.snapshot().get("created_at"), Some(Value::Timestamp(_))));

    let stored = result
        .record(true)
        .expect("refresh user")
        .expect("user row exists");
    assert_eq!(stored.get("id"), Some(&Value::BigInt(1)));
    assert_eq!(stored.get("name"), Some(&Value::from("a")));
    assert_eq!(stored.get("email"), Some(&Value::from("a@x.com")));
    assert!(matches!(stored.get("created_at"), Some(Value::BigInt(_))));
    assert_eq!(stored.get("updated_at"), Some(&Value::Null));
}

#[test]
fn supplied_id_and_read_only_input_are_ignored_on_insert() {
    let db = users_db();
    let users = users();
    users
        .insert(&db, &Record::from([("name", "first")]))
        .expect("insert first");

    let record = Record::from([("id", Value::BigInt(40)), ("name", Value::from("second"))])
        .with("created_at", 5_i64);
    let stored = users
        .insert(&db, &record)
        .expect("insert second")
        .record(true)
        .expect("refresh second")
        .expect("second row exists");

    assert_eq!(stored.get("id"), Some(&Value::BigInt(2)));
    assert_ne!(stored.get("created_at"), Some(&Value::BigInt(5)));
}

#[test]
fn update_sets_supplied_and_on_update_columns() {
    let db = users_db();
    let users = users();
    let created = users
        .insert(&db, &Record::from([("name", "a")]))
        .expect("insert user")
        .record(true)
        .expect("refresh user")
        .expect("user row exists");

    let result = users
        .update(&db, &Record::from([("id", Value::BigInt(1)), ("name", Value::from("b"))]))
        .expect("update user");
    assert_eq!(result.rows_affected(), 1);
    assert_eq!(result.last_insert_id(), None);

    let stored = result
        .record(true)
        .expect("refresh user")
        .expect("user row exists");
    assert_eq!(stored.get("name"), Some(&Value::from("b")));
    assert_eq!(stored.get("created_at"), created.get("created_at"));
    assert!(matches!(stored.get("updated_at"), Some(Value::BigInt(_))));
}

#[test]
fn update_of_missing_row_affects_nothing() {
    let db = users_db();
    let users = users();
    let result = users
        .update(&db, &Record::from([("id", Value::BigInt(9)), ("name", Value::from("b"))]))
        .expect("update runs");
    assert_eq!(result.rows_affected(), 0);
    assert_eq!(result.record(true).expect("refresh runs"), None);
}

#[test]
fn delete_then_refresh_finds_nothing() {
    let db = users_db();
    let users = users();
    users
        .insert(&db, &Record::from([("name", "a")]))
        .expect("insert user");

    let result = users
        .delete(&db, &Record::from([("id", 1_i64)]))
        .expect("delete user");
    assert_eq!(result.rows_affected(), 1);
    assert_eq!(result.state(), State::Delete);
    assert_eq!(result.record(true).expect("refresh runs"), None);
    assert_eq!(
        result.record(false).expect("snapshot"),
        Some(Record::from([("id", 1_i64)]))
    );
    assert_eq!(count(&db, &users), 0);
}

#[test]
fn validation_failure_leaves_table_untouched() {
    let db = users_db();
    let users = users();

    let err = users
        .insert(&db, &Record::from([("name", "   ")]))
        .expect_err("blank name is rejected");
    assert_eq!(err.to_string(), "name: cannot be blank");

    let err = users
        .insert(&db, &Record::from([("name", "x".repeat(21))]))
        .expect_err("long name is rejected");
    assert_eq!(err.to_string(), "name: the length must be between 1 and 20");
    assert_eq!(count(&db, &users), 0);
}

#[test]
fn unique_rule_checks_stored_rows() {
    let db = users_db();
    let users = users();
    users
        .insert(&db, &Record::from([("name", "a"), ("email", "a@x.com")]))
        .expect("insert a");
    users
        .insert(&db, &Record::from([("name", "b"), ("email", "b@x.com")]))
        .expect("insert b");

    let err = users
        .insert(&db, &Record::from([("name", "c"), ("email", " a@x.com ")]))
        .expect_err("duplicate email on insert");
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "E-mail: is already in use");

    users
        .update(
            &db,
            &Record::from([("id", Value::BigInt(1)), ("email", Value::from("a@x.com"))]),
        )
        .expect("keeping its own email is not a duplicate");

    let err = users
        .update(
            &db,
            &Record::from([("id", Value::BigInt(2)), ("email", Value::from("a@x.com"))]),
        )
        .expect_err("duplicate email on update");
    assert_eq!(err.to_string(), "E-mail: is already in use");

    users
        .insert(&db, &Record::from([("name", "d")]))
        .expect("missing email is not checked");
    assert_eq!(count(&db, &users), 3);
}

#[test]
fn store_errors_pass_through() {
    let db = users_db();
    let loose = Table::new("users")
        .field(Field::new("id").primary_key().auto_increment())
        .field(Field::new("name"))
        .field(Field::new("created_at").default_value(0_i64));

    let err = loose
        .insert(&db, &Record::from([("created_at", 1_i64)]))
        .expect_err("NOT NULL violation");
    match err {
        Error::Query(e) => {
            assert_eq!(e.kind, sqldac::QueryErrorKind::Constraint);
            assert_eq!(
                e.sql.as_deref(),
                Some("INSERT INTO users(name, created_at)VALUES(?, ?)")
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn caller_owns_the_transaction() {
    let db = users_db();
    let users = users();

    db.execute_batch("BEGIN").expect("begin");
    users
        .insert(&db, &Record::from([("name", "a")]))
        .expect("insert inside transaction");
    assert_eq!(count(&db, &users), 1);
    db.execute_batch("ROLLBACK").expect("rollback");

    assert_eq!(count(&db, &users), 0);
}

#[test]
fn hooks_can_adjust_and_delegate() {
    let db = users_db();
    let users = users()
        .on_insert(|mut ctx| {
            if let Some(name) = ctx.record.get("name").and_then(Value::as_str) {
                let lowered = name.to_lowercase();
                ctx.record.set("name", lowered);
            }
            let table = ctx.table;
            table.default_insert(ctx)
        })
        .on_delete(|ctx| Err(Error::Custom(format!("{} rows are never deleted", ctx.table.name()))));

    let stored = users
        .insert(&db, &Record::from([("name", "ADA")]))
        .expect("insert through hook")
        .record(true)
        .expect("refresh")
        .expect("row exists");
    assert_eq!(stored.get("name"), Some(&Value::from("ada")));

    let err = users
        .delete(&db, &Record::from([("id", 1_i64)]))
        .expect_err("delete is vetoed");
    assert_eq!(err.to_string(), "users rows are never deleted");
    assert_eq!(count(&db, &users), 1);
}
