//! Validation rule contracts and field validation.
//!
//! Rules are immutable declarations shared between tables. A rule that needs to
//! see the operation it runs in (the table, the executor, the pending record)
//! implements [`ContextRule`]; the engine hands it the current [`Context`] at
//! call time instead of storing it in the rule.

use std::fmt;
use std::sync::Arc;

use sqldac_core::{Error, FieldValidationError, Result, ValidationError, Value};

use crate::context::Context;
use crate::field::Field;

/// A rule that only looks at the value.
pub trait Rule: Send + Sync {
    /// Check the value.
    fn check(&self, value: &Value) -> std::result::Result<(), ValidationError>;

    /// Name used in debug output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Rule for F
where
    F: Fn(&Value) -> std::result::Result<(), ValidationError> + Send + Sync,
{
    fn check(&self, value: &Value) -> std::result::Result<(), ValidationError> {
        self(value)
    }
}

/// Failure of a [`ContextRule`].
#[derive(Debug)]
pub enum RuleError {
    /// The value is invalid; reported against the field.
    Invalid(ValidationError),
    /// The rule itself could not run (for example a query failed); passed through.
    Failed(Error),
}

impl From<ValidationError> for RuleError {
    fn from(e: ValidationError) -> Self {
        RuleError::Invalid(e)
    }
}

impl From<Error> for RuleError {
    fn from(e: Error) -> Self {
        RuleError::Failed(e)
    }
}

/// A rule checked against the current operation.
pub trait ContextRule: Send + Sync {
    /// Check the value. `ctx.field` is the field under validation and
    /// `ctx.record` holds the values resolved so far.
    fn check(&self, ctx: &Context<'_>, value: &Value) -> std::result::Result<(), RuleError>;

    /// Name used in debug output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// One entry of [`Field::validations`].
#[derive(Clone)]
pub enum Validation {
    Rule(Arc<dyn Rule>),
    Contextual(Arc<dyn ContextRule>),
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Rule(r) => f.debug_tuple("Rule").field(&r.name()).finish(),
            Validation::Contextual(r) => f.debug_tuple("Contextual").field(&r.name()).finish(),
        }
    }
}

/// Run a field's rules in order, stopping at the first failure.
///
/// A violation is attributed to the field as `"<title>: <message>"`; a rule that
/// fails to run returns its error unchanged.
pub(crate) fn validate_field(ctx: &Context<'_>, field: &Field, value: &Value) -> Result<()> {
    for validation in &field.validations {
        let outcome = match validation {
            Validation::Rule(rule) => rule.check(value).map_err(RuleError::Invalid),
            Validation::Contextual(rule) => rule.check(ctx, value),
        };
        match outcome {
            Ok(()) => {}
            Err(RuleError::Invalid(error)) => {
                return Err(Error::Validation(FieldValidationError {
                    field: field.get_title().to_string(),
                    error,
                }));
            }
            Err(RuleError::Failed(e)) => return Err(e),
        }
    }
    Ok(())
}
