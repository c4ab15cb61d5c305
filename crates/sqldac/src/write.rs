//! Default Insert, Update and Delete handlers.

use sqldac_core::{COL_SEP_WIDE, Error, PLACEHOLDER, Record, Result, Value};

use crate::context::{Context, State};
use crate::field::Field;
use crate::result::WriteResult;
use crate::table::Table;
use crate::validation::validate_field;

impl Table {
    /// Insert `ctx.record` without consulting the insert hook.
    ///
    /// Auto-increment fields are left to the store. Read-only fields take their
    /// default (and are skipped when they have none); other fields take the
    /// supplied value, falling back to the default. Each value is validated
    /// before anything is executed.
    pub fn default_insert<'a>(&'a self, mut ctx: Context<'a>) -> Result<WriteResult<'a>> {
        let layout = self.open()?;
        ctx.state = State::Insert;
        let mut record = ctx.record.clone();

        let mut columns = Vec::with_capacity(self.fields().len());
        let mut placeholders = Vec::with_capacity(self.fields().len());
        let mut args = Vec::with_capacity(self.fields().len());

        for (i, field) in self.fields().iter().enumerate() {
            if field.auto_increment {
                continue;
            }
            let key = &layout.keys()[i];
            let supplied = if field.read_only {
                if field.default.is_none() {
                    continue;
                }
                None
            } else {
                ctx.record.get(key).filter(|v| !v.is_null()).cloned()
            };
            let value = match supplied {
                Some(value) => value,
                None => field.get_default().unwrap_or(Value::Null),
            };

            let value = self.resolve(&ctx, field, key, value, &mut record)?;
            columns.push(field.name.as_str());
            placeholders.push(PLACEHOLDER);
            args.push(value);
        }

        let sql = format!(
            "INSERT INTO {}({})VALUES({})",
            self.name(),
            columns.join(COL_SEP_WIDE),
            placeholders.join(COL_SEP_WIDE)
        );
        tracing::debug!(table = %self.name(), sql = %sql, params = ?args, "Executing insert");
        let outcome = ctx.executor.execute(&sql, &args)?;

        ctx.record = record;
        Ok(WriteResult::new(ctx, outcome))
    }

    /// Update the row addressed by the primary key in `ctx.record`, without
    /// consulting the update hook.
    ///
    /// Primary-key and auto-increment fields are never set. Read-only or
    /// unsupplied fields take their on-update value, and are left out when there
    /// is none.
    pub fn default_update<'a>(&'a self, mut ctx: Context<'a>) -> Result<WriteResult<'a>> {
        let (condition, where_args) = self.where_primary_key(&ctx.record)?;
        let layout = self.open()?;
        ctx.state = State::Update;
        let mut record = ctx.record.clone();

        let mut sets = Vec::new();
        let mut args = Vec::new();

        for (i, field) in self.fields().iter().enumerate() {
            if field.primary_key || field.auto_increment {
                continue;
            }
            let key = &layout.keys()[i];
            let value = match ctx.record.get(key) {
                Some(Value::Null) if !field.read_only => {
                    field.get_on_update().unwrap_or(Value::Null)
                }
                Some(value) if !field.read_only => value.clone(),
                _ => match field.get_on_update() {
                    Some(value) => value,
                    None => continue,
                },
            };

            let value = self.resolve(&ctx, field, key, value, &mut record)?;
            sets.push(format!("{} = {PLACEHOLDER}", field.name));
            args.push(value);
        }

        if sets.is_empty() {
            return Err(Error::config(format!(
                "table {}: not enough columns to update",
                self.name()
            )));
        }

        let sql = format!(
            "UPDATE {} SET {} WHERE {condition}",
            self.name(),
            sets.join(COL_SEP_WIDE)
        );
        args.extend(where_args);
        tracing::debug!(table = %self.name(), sql = %sql, params = ?args, "Executing update");
        let outcome = ctx.executor.execute(&sql, &args)?;

        ctx.record = record;
        Ok(WriteResult::new(ctx, outcome))
    }

    /// Delete the row addressed by the primary key in `ctx.record`, without
    /// consulting the delete hook. No validation is performed.
    pub fn default_delete<'a>(&'a self, mut ctx: Context<'a>) -> Result<WriteResult<'a>> {
        let (condition, args) = self.where_primary_key(&ctx.record)?;
        ctx.state = State::Delete;

        let sql = format!("DELETE FROM {} WHERE {condition}", self.name());
        tracing::debug!(table = %self.name(), sql = %sql, params = ?args, "Executing delete");
        let outcome = ctx.executor.execute(&sql, &args)?;

        Ok(WriteResult::new(ctx, outcome))
    }

    /// Conform `value`, store it in the working record and validate it there.
    fn resolve<'a>(
        &'a self,
        base: &Context<'a>,
        field: &'a Field,
        key: &str,
        value: Value,
        record: &mut Record,
    ) -> Result<Value> {
        let value = field.conform(value)?;
        record.set(key, value.clone());

        let ctx = Context {
            record: std::mem::take(record),
            field: Some(field),
            ..base.clone_without_record()
        };
        let outcome = validate_field(&ctx, field, &value);
        *record = ctx.record;
        outcome.map(|()| value)
    }
}
