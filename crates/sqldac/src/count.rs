//! `SELECT COUNT(*)` helpers, used for duplicate detection.

use sqldac_core::{Error, Executor, QueryErrorKind, Record, Result, Value};
use sqldac_query::conjoin;

use crate::field::Field;
use crate::table::Table;

impl Table {
    /// `SELECT COUNT(*) FROM <table>[ WHERE <where>]`.
    pub fn count(&self, executor: &dyn Executor, where_: &str, args: &[Value]) -> Result<i64> {
        self.open()?;
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.name());
        if !where_.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(where_);
        }
        tracing::debug!(table = %self.name(), sql = %sql, params = ?args, "Executing count");

        let row = executor.query_one(&sql, args)?.ok_or_else(|| {
            Error::query(QueryErrorKind::Decode, "COUNT(*) returned no rows")
        })?;
        row.scalar_i64()
    }

    /// Count rows whose `field` column equals `value`.
    ///
    /// NULL matches with `IS NULL`; text is compared trimmed on both sides. The
    /// column condition comes first, then `where_`; the value (if bound) comes
    /// before `args`.
    pub fn count_value(
        &self,
        executor: &dyn Executor,
        field: &Field,
        value: &Value,
        where_: &str,
        args: &[Value],
    ) -> Result<i64> {
        let (condition, mut params) = match value {
            Value::Null => (format!("{} IS NULL", field.name), Vec::new()),
            Value::Text(s) => (
                format!("TRIM({}) = ?", field.name),
                vec![Value::Text(s.trim().to_string())],
            ),
            other => (format!("{} = ?", field.name), vec![other.clone()]),
        };
        params.extend_from_slice(args);
        self.count(executor, &conjoin(&condition, where_), &params)
    }

    /// Count rows whose `field` column equals the record's value for it.
    ///
    /// With `exclude_self`, the row addressed by the record's primary key is left
    /// out (`pk <> ?`), so a record is not a duplicate of itself.
    pub fn count_record(
        &self,
        executor: &dyn Executor,
        field: &Field,
        record: &Record,
        exclude_self: bool,
        where_: &str,
        args: &[Value],
    ) -> Result<i64> {
        let (where_, args) = if exclude_self {
            let (condition, mut pk_args) = self.primary_key_condition(record, "<>")?;
            pk_args.extend_from_slice(args);
            (conjoin(&condition, where_), pk_args)
        } else {
            (where_.to_string(), args.to_vec())
        };

        let layout = self.open()?;
        let key = layout.key_of(&field.name).unwrap_or_else(|| field.get_key());
        let value = record.get(key).cloned().unwrap_or_default();
        self.count_value(executor, field, &value, &where_, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Unique;
    use crate::testing::MockExecutor;

    fn users() -> Table {
        Table::new("users")
            .field(Field::new("id").primary_key().auto_increment())
            .field(Field::new("email").key("mail").validate_with(Unique::new()))
    }

    #[test]
    fn test_count_shapes() {
        let table = users();
        let db = MockExecutor::new().with_count(3).with_count(1);
        assert_eq!(table.count(&db, "", &[]).unwrap(), 3);
        assert_eq!(table.count(&db, "id > ?", &[Value::BigInt(1)]).unwrap(), 1);

        let statements = db.statements();
        assert_eq!(statements[0].0, "SELECT COUNT(*) FROM users");
        assert_eq!(statements[1].0, "SELECT COUNT(*) FROM users WHERE id > ?");
    }

    #[test]
    fn test_count_value_null() {
        let table = users();
        let db = MockExecutor::new().with_count(0);
        let field = table.get_field("email").unwrap();
        table
            .count_value(&db, field, &Value::Null, "id > ?", &[Value::BigInt(9)])
            .unwrap();

        let (sql, args) = &db.statements()[0];
        assert_eq!(sql, "SELECT COUNT(*) FROM users WHERE email IS NULL AND id > ?");
        assert_eq!(args, &vec![Value::BigInt(9)]);
    }

    #[test]
    fn test_count_value_trims_text() {
        let table = users();
        let db = MockExecutor::new().with_count(0);
        let field = table.get_field("email").unwrap();
        table
            .count_value(&db, field, &Value::from("  a@x.com "), "", &[])
            .unwrap();

        let (sql, args) = &db.statements()[0];
        assert_eq!(sql, "SELECT COUNT(*) FROM users WHERE TRIM(email) = ?");
        assert_eq!(args, &vec![Value::from("a@x.com")]);
    }

    #[test]
    fn test_count_value_other_types() {
        let table = users();
        let db = MockExecutor::new().with_count(0);
        let field = table.get_field("id").unwrap();
        table.count_value(&db, field, &Value::BigInt(4), "", &[]).unwrap();
        assert_eq!(db.statements()[0].0, "SELECT COUNT(*) FROM users WHERE id = ?");
    }

    #[test]
    fn test_count_record_excluding_self() {
        let table = users();
        let db = MockExecutor::new().with_count(0);
        let field = table.get_field("email").unwrap();
        let record = Record::from([("id", Value::BigInt(5)), ("mail", Value::from("b@x.com"))]);
        table
            .count_record(&db, field, &record, true, "active = ?", &[Value::Bool(true)])
            .unwrap();

        let (sql, args) = &db.statements()[0];
        assert_eq!(
            sql,
            "SELECT COUNT(*) FROM users WHERE TRIM(email) = ? AND id <> ? AND active = ?"
        );
        assert_eq!(
            args,
            &vec![Value::from("b@x.com"), Value::BigInt(5), Value::Bool(true)]
        );
    }

    #[test]
    fn test_count_record_without_exclusion_reads_key() {
        let table = users();
        let db = MockExecutor::new().with_count(2);
        let field = table.get_field("email").unwrap();
        let record = Record::from([("mail", "c@x.com")]);
        let n = table.count_record(&db, field, &record, false, "", &[]).unwrap();

        assert_eq!(n, 2);
        assert_eq!(db.statements()[0].1, vec![Value::from("c@x.com")]);
    }

    #[test]
    fn test_count_record_missing_primary_key() {
        let table = users();
        let db = MockExecutor::new();
        let field = table.get_field("email").unwrap();
        let err = table
            .count_record(&db, field, &Record::new(), true, "", &[])
            .unwrap_err();
        assert!(err.is_missing_value());
        assert!(db.statements().is_empty());
    }

    #[test]
    fn test_unique_rule_on_insert_and_update() {
        let table = users();
        let db = MockExecutor::new().with_count(1);
        let err = table
            .insert(&db, &Record::from([("mail", "taken@x.com")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "email: is already in use");
        assert_eq!(
            db.statements()[0].0,
            "SELECT COUNT(*) FROM users WHERE TRIM(email) = ?"
        );

        let db = MockExecutor::new().with_count(0);
        table
            .update(
                &db,
                &Record::from([("id", Value::BigInt(3)), ("mail", Value::from("mine@x.com"))]),
            )
            .unwrap();
        let statements = db.statements();
        assert_eq!(
            statements[0].0,
            "SELECT COUNT(*) FROM users WHERE TRIM(email) = ? AND id <> ?"
        );
        assert_eq!(statements[1].0, "UPDATE users SET email = ? WHERE id = ?");
    }
}
