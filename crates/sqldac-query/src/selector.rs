//! Builder for the clause suffix of a SELECT statement.
//!
//! A [`Selector`] renders to the text that follows `SELECT <cols> FROM <table>`,
//! for example `WHERE id = ? ORDER BY name LIMIT 10`. Parameters are not held by
//! the selector; callers pass them alongside, in placeholder order.

use std::fmt;

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    const fn as_sql(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

/// SELECT clause builder.
///
/// # Example
///
/// ```
/// use sqldac_query::{Order, Selector};
///
/// let clauses = Selector::new()
///     .filter("status = ?")
///     .filter("age > ?")
///     .order_by("name", Order::Asc)
///     .limit(10)
///     .build();
/// assert_eq!(clauses, "WHERE status = ? AND age > ? ORDER BY name ASC LIMIT 10");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    filters: Vec<String>,
    order_by: Vec<(String, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Selector {
    /// Create an empty selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a WHERE condition. Multiple conditions are joined with AND.
    ///
    /// Blank conditions are ignored.
    #[must_use]
    pub fn filter(mut self, condition: impl Into<String>) -> Self {
        let condition = condition.into();
        if !condition.trim().is_empty() {
            self.filters.push(condition);
        }
        self
    }

    /// Add an ORDER BY term.
    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, order: Order) -> Self {
        self.order_by.push((column.into(), order));
        self
    }

    /// Set LIMIT.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set OFFSET.
    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// The WHERE condition alone (without the keyword), if any.
    pub fn condition(&self) -> Option<String> {
        if self.filters.is_empty() {
            None
        } else {
            Some(self.filters.join(" AND "))
        }
    }

    /// Render the clause text.
    pub fn build(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(condition) = self.condition() {
            parts.push(format!("WHERE {condition}"));
        }
        if !self.order_by.is_empty() {
            let terms: Vec<String> = self
                .order_by
                .iter()
                .map(|(col, order)| format!("{col} {}", order.as_sql()))
                .collect();
            parts.push(format!("ORDER BY {}", terms.join(", ")));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            parts.push(format!("OFFSET {offset}"));
        }
        f.write_str(&parts.join(" "))
    }
}
