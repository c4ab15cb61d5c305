//! Error types for sqldac.

use std::fmt;

/// Result alias used throughout sqldac.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error type.
#[derive(Debug)]
pub enum Error {
    /// Schema or usage mistake detected before a statement is built.
    Config(ConfigError),
    /// A record lacks a value the operation requires.
    MissingValue(MissingValueError),
    /// A field value failed one of its validation rules.
    Validation(FieldValidationError),
    /// The executor reported a failure.
    Query(QueryError),
    /// Free-form error raised by hooks or drivers.
    Custom(String),
}

impl Error {
    /// Build a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(ConfigError {
            message: message.into(),
        })
    }

    /// Build a query error of the given kind.
    pub fn query(kind: QueryErrorKind, message: impl Into<String>) -> Self {
        Error::Query(QueryError {
            kind,
            message: message.into(),
            sql: None,
            source: None,
        })
    }

    /// True for configuration errors.
    pub const fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// True for missing-value errors.
    pub const fn is_missing_value(&self) -> bool {
        matches!(self, Error::MissingValue(_))
    }

    /// True for validation errors.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "{e}"),
            Error::MissingValue(e) => write!(f, "{e}"),
            Error::Validation(e) => write!(f, "{e}"),
            Error::Query(e) => write!(f, "{e}"),
            Error::Custom(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Validation(e) => Some(&e.error),
            Error::Query(e) => e
                .source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

/// Schema or usage error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A record has no entry for a required key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingValueError {
    /// Table the operation ran against.
    pub table: String,
    /// Record key that was absent.
    pub key: String,
}

impl fmt::Display for MissingValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "primary key {} is required in record for table {}",
            self.key, self.table
        )
    }
}

/// Category of a rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Value is missing or empty.
    Required,
    /// Value length is out of range.
    Length,
    /// Value does not match a pattern.
    Pattern,
    /// Value is not among the allowed choices.
    OneOf,
    /// Value is already used by another row.
    Unique,
    /// Value cannot represent the declared column type.
    Type,
    /// Rule-specific failure.
    Custom,
}

/// A rule violation, before it is attributed to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A [`ValidationErrorKind::Custom`] violation.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::Custom, message)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// A rule violation attributed to a field, displayed as `"<title>: <message>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    /// Title of the offending field.
    pub field: String,
    pub error: ValidationError,
}

impl fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

/// Category of an executor failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// Constraint violation (unique, foreign key, not null, check).
    Constraint,
    /// SQL syntax or unknown identifier.
    Syntax,
    /// Database busy or locked.
    Busy,
    /// Result could not be read into the expected shape.
    Decode,
    /// Any other database failure.
    Database,
}

/// An error reported while executing a statement.
#[derive(Debug)]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub message: String,
    /// The statement that failed, when known.
    pub sql: Option<String>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl QueryError {
    /// Attach the failing statement.
    #[must_use]
    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sql {
            Some(sql) => write!(f, "{} (sql: {sql})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl From<FieldValidationError> for Error {
    fn from(e: FieldValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<QueryError> for Error {
    fn from(e: QueryError) -> Self {
        Error::Query(e)
    }
}
