//! Field (column) definitions.

use std::fmt;
use std::sync::Arc;

use sqldac_core::{FieldValidationError, SqlType, ValidationError, ValidationErrorKind, Value};

use crate::validation::{ContextRule, Rule, Validation};

/// Produces a value for a field on insert (`default`) or update (`on_update`).
#[derive(Clone)]
pub enum Provider {
    /// A fixed value.
    Value(Value),
    /// A function evaluated on every write. Returning `None` means "no value".
    Func(Arc<dyn Fn() -> Option<Value> + Send + Sync>),
}

impl Provider {
    /// Evaluate the provider.
    pub fn get(&self) -> Option<Value> {
        match self {
            Provider::Value(v) => Some(v.clone()),
            Provider::Func(f) => f(),
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Provider::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Schema description of one column.
///
/// # Example
///
/// ```
/// use sqldac::{Field, Value};
/// use sqldac::rules::Required;
///
/// let id = Field::new("id").primary_key().auto_increment();
/// let name = Field::new("name").title("Name").validate(Required);
/// let created = Field::new("created_at").read_only().default_with(|| Some(Value::now()));
/// assert_eq!(name.get_title(), "Name");
/// assert_eq!(created.get_key(), "created_at");
/// # let _ = id;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Field {
    /// Column name in the database.
    pub name: String,
    /// Human-readable label used in validation messages. Defaults to `name`.
    pub title: Option<String>,
    /// Record key the field is read from and written to. Defaults to `name`.
    pub key: Option<String>,
    /// Declared type; resolved values are conformed to it before validation.
    pub sql_type: SqlType,
    pub primary_key: bool,
    /// Value generated by the store; never written on insert.
    pub auto_increment: bool,
    /// Never accepted from caller input; written only from a provider.
    pub read_only: bool,
    /// Applied on insert when no value is supplied or the field is read-only.
    pub default: Option<Provider>,
    /// Applied on update when no value is supplied or the field is read-only.
    pub on_update: Option<Provider>,
    /// Rules checked in order on insert and update.
    pub validations: Vec<Validation>,
}

impl Field {
    /// Create a field for the given column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the display title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Read and write this column under a different record key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Declare the column type.
    #[must_use]
    pub fn sql_type(mut self, ty: SqlType) -> Self {
        self.sql_type = ty;
        self
    }

    /// Mark as (part of) the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark as generated by the store.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Mark as read-only.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Fixed default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(Provider::Value(value.into()));
        self
    }

    /// Computed default value.
    #[must_use]
    pub fn default_with<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Option<Value> + Send + Sync + 'static,
    {
        self.default = Some(Provider::Func(Arc::new(f)));
        self
    }

    /// Fixed on-update value.
    #[must_use]
    pub fn on_update_value(mut self, value: impl Into<Value>) -> Self {
        self.on_update = Some(Provider::Value(value.into()));
        self
    }

    /// Computed on-update value.
    #[must_use]
    pub fn on_update_with<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Option<Value> + Send + Sync + 'static,
    {
        self.on_update = Some(Provider::Func(Arc::new(f)));
        self
    }

    /// Append a plain validation rule.
    #[must_use]
    pub fn validate(mut self, rule: impl Rule + 'static) -> Self {
        self.validations.push(Validation::Rule(Arc::new(rule)));
        self
    }

    /// Append a rule that is checked with the current [`Context`](crate::Context).
    #[must_use]
    pub fn validate_with(mut self, rule: impl ContextRule + 'static) -> Self {
        self.validations.push(Validation::Contextual(Arc::new(rule)));
        self
    }

    /// Title for messages: `title` when set, otherwise `name`.
    pub fn get_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Record key: `key` when set, otherwise `name`.
    pub fn get_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.name)
    }

    /// Evaluate the default provider.
    pub fn get_default(&self) -> Option<Value> {
        self.default.as_ref().and_then(Provider::get)
    }

    /// Evaluate the on-update provider.
    pub fn get_on_update(&self) -> Option<Value> {
        self.on_update.as_ref().and_then(Provider::get)
    }

    /// Conform `value` to the declared type.
    pub(crate) fn conform(&self, value: Value) -> Result<Value, FieldValidationError> {
        if self.sql_type == SqlType::Any {
            return Ok(value);
        }
        value.conform(self.sql_type).ok_or_else(|| FieldValidationError {
            field: self.get_title().to_string(),
            error: ValidationError::new(
                ValidationErrorKind::Type,
                format!("must be a valid {}", self.sql_type),
            ),
        })
    }
}
