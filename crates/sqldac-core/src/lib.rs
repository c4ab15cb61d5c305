//! Core types and traits for sqldac.
//!
//! `sqldac-core` is the foundation layer shared by the query helpers, the table
//! engine and the drivers.
//!
//! # Role In The Architecture
//!
//! - **Contract layer**: [`Executor`] is implemented by drivers (or by a caller's
//!   own connection/transaction wrapper) and consumed by the table engine.
//! - **Data model**: [`Value`], [`Row`] and [`Record`] carry statement parameters,
//!   result rows and untyped records.
//! - **Errors**: one [`Error`] enum for configuration, missing-value, validation
//!   and execution failures.

pub mod error;
pub mod executor;
pub mod record;
pub mod row;
pub mod types;
pub mod value;

pub use error::{
    ConfigError, Error, FieldValidationError, MissingValueError, QueryError, QueryErrorKind,
    Result, ValidationError, ValidationErrorKind,
};
pub use executor::{COL_SEP_WIDE, ExecResult, Executor, PLACEHOLDER};
pub use record::Record;
pub use row::Row;
pub use types::SqlType;
pub use value::Value;
