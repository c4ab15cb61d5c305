//! Built-in validation rules.
//!
//! Except for [`Required`], rules accept NULL and empty text; combine them with
//! `Required` to reject missing values.

use regex::Regex;
use sqldac_core::{Error, ValidationError, ValidationErrorKind, Value};

use crate::context::{Context, State};
use crate::validation::{ContextRule, Rule, RuleError};

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Text(s) => s.trim().is_empty(),
        Value::Bytes(b) => b.is_empty(),
        _ => false,
    }
}

/// The value must be present and not blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Rule for Required {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        if is_empty(value) {
            return Err(ValidationError::new(
                ValidationErrorKind::Required,
                "cannot be blank",
            ));
        }
        Ok(())
    }
}

/// Text length (in characters) or byte length must fall within `min..=max`.
/// A `max` of 0 means unbounded.
#[derive(Debug, Clone, Copy)]
pub struct Length {
    pub min: usize,
    pub max: usize,
}

impl Length {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl Rule for Length {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let len = match value {
            _ if is_empty(value) => return Ok(()),
            Value::Text(s) => s.chars().count(),
            Value::Bytes(b) => b.len(),
            _ => return Ok(()),
        };
        if len >= self.min && (self.max == 0 || len <= self.max) {
            return Ok(());
        }
        let message = match (self.min, self.max) {
            (min, 0) => format!("the length must be no less than {min}"),
            (0, max) => format!("the length must be no more than {max}"),
            (min, max) if min == max => format!("the length must be exactly {min}"),
            (min, max) => format!("the length must be between {min} and {max}"),
        };
        Err(ValidationError::new(ValidationErrorKind::Length, message))
    }
}

/// Text must match a regular expression.
///
/// The expression is compiled once, when the rule is built.
#[derive(Debug, Clone)]
pub struct Pattern {
    pattern: String,
    regex: Option<Regex>,
}

impl Pattern {
    /// An invalid pattern never matches; use [`Pattern::checked`] to reject it
    /// at declaration time instead.
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let regex = match Regex::new(&pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!(
                    pattern = %pattern,
                    error = %e,
                    "Pattern does not compile; it will never match"
                );
                None
            }
        };
        Self { pattern, regex }
    }

    /// Like [`Pattern::new`], but fails with a configuration error when the
    /// pattern does not compile.
    pub fn checked(pattern: impl Into<String>) -> Result<Self, Error> {
        let pattern = pattern.into();
        let regex =
            Regex::new(&pattern).map_err(|e| Error::config(format!("invalid regex pattern: {e}")))?;
        Ok(Self {
            pattern,
            regex: Some(regex),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|r| r.is_match(text))
    }
}

impl Rule for Pattern {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match value.as_str() {
            Some(s) if !s.is_empty() && !self.is_match(s) => Err(ValidationError::new(
                ValidationErrorKind::Pattern,
                "must be in a valid format",
            )),
            _ => Ok(()),
        }
    }
}

/// The value must equal one of the listed choices.
#[derive(Debug, Clone)]
pub struct OneOf {
    choices: Vec<Value>,
}

impl OneOf {
    pub fn new<V: Into<Value>>(choices: impl IntoIterator<Item = V>) -> Self {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }
}

impl Rule for OneOf {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        if is_empty(value) || self.choices.contains(value) {
            return Ok(());
        }
        Err(ValidationError::new(
            ValidationErrorKind::OneOf,
            "must be a valid value",
        ))
    }
}

/// No other row may hold the same value in this column.
///
/// Text is compared trimmed. On update the row being written is excluded from
/// the search through its primary key.
#[derive(Debug, Clone, Default)]
pub struct Unique {
    condition: String,
    args: Vec<Value>,
}

impl Unique {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only consider rows matching an extra condition, e.g. `tenant_id = ?`.
    #[must_use]
    pub fn within(mut self, condition: impl Into<String>, args: Vec<Value>) -> Self {
        self.condition = condition.into();
        self.args = args;
        self
    }
}

impl ContextRule for Unique {
    fn check(&self, ctx: &Context<'_>, value: &Value) -> Result<(), RuleError> {
        let Some(field) = ctx.field else {
            return Ok(());
        };
        if is_empty(value) {
            return Ok(());
        }
        let count = ctx.table.count_record(
            ctx.executor,
            field,
            &ctx.record,
            ctx.state == State::Update,
            &self.condition,
            &self.args,
        )?;
        if count > 0 {
            return Err(ValidationError::new(ValidationErrorKind::Unique, "is already in use").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(Required.check(&Value::Null).is_err());
        assert!(Required.check(&Value::from("  ")).is_err());
        assert!(Required.check(&Value::from("a")).is_ok());
        assert!(Required.check(&Value::BigInt(0)).is_ok());
    }

    #[test]
    fn test_length_messages() {
        let rule = Length::new(2, 4);
        assert!(rule.check(&Value::from("abc")).is_ok());
        assert!(rule.check(&Value::Null).is_ok());
        let err = rule.check(&Value::from("abcde")).unwrap_err();
        assert_eq!(err.message, "the length must be between 2 and 4");
        let err = Length::new(3, 0).check(&Value::from("ab")).unwrap_err();
        assert_eq!(err.message, "the length must be no less than 3");
    }

    #[test]
    fn test_length_counts_chars() {
        assert!(Length::new(0, 3).check(&Value::from("äöü")).is_ok());
    }

    #[test]
    fn test_pattern() {
        let rule = Pattern::new(r"^\d+$");
        assert!(rule.check(&Value::from("123")).is_ok());
        assert!(rule.check(&Value::from("")).is_ok());
        assert_eq!(
            rule.check(&Value::from("12a")).unwrap_err().kind,
            ValidationErrorKind::Pattern
        );
    }

    #[test]
    fn test_checked_pattern() {
        assert!(Pattern::checked(r"^[a-z]+$").is_ok());
        let err = Pattern::checked("[unclosed").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().starts_with("invalid regex pattern"));
    }

    #[test]
    fn test_uncompilable_pattern_never_matches() {
        let rule = Pattern::new("[unclosed");
        assert_eq!(rule.pattern(), "[unclosed");
        assert_eq!(
            rule.check(&Value::from("abc")).unwrap_err().kind,
            ValidationErrorKind::Pattern
        );
        assert!(rule.check(&Value::from("[unclosed")).is_err());
        assert!(rule.check(&Value::from("")).is_ok());
        assert!(rule.check(&Value::Null).is_ok());
    }

    #[test]
    fn test_email_shaped_pattern() {
        let rule = Pattern::new(r"^[^@\s]+@[^@\s]+\.[a-z]{2,}$");
        assert!(rule.check(&Value::from("a@x.com")).is_ok());
        assert!(rule.check(&Value::from("nope")).is_err());
    }

    #[test]
    fn test_one_of() {
        let rule = OneOf::new(["draft", "published"]);
        assert!(rule.check(&Value::from("draft")).is_ok());
        assert!(rule.check(&Value::from("deleted")).is_err());
    }

    #[test]
    fn test_closure_rule() {
        let positive = |v: &Value| match v.as_i64() {
            Some(n) if n <= 0 => Err(ValidationError::custom("must be positive")),
            _ => Ok(()),
        };
        assert!(positive.check(&Value::BigInt(1)).is_ok());
        assert!(positive.check(&Value::BigInt(-1)).is_err());
    }
}
