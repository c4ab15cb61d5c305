//! Query fragment helpers for sqldac.
//!
//! The table engine builds its own statements; this crate only composes the
//! pieces callers hand to it: the clause suffix of a SELECT ([`Selector`]) and
//! raw WHERE conditions ([`conjoin`], [`column_conditions`]).

pub mod condition;
pub mod selector;

pub use condition::{column_conditions, conjoin};
pub use selector::{Order, Selector};
