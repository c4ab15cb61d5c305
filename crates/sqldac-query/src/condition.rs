//! Helpers for composing raw WHERE conditions.

/// Join two optional conditions with AND, keeping `first` in front.
///
/// ```
/// use sqldac_query::conjoin;
///
/// assert_eq!(conjoin("a = ?", ""), "a = ?");
/// assert_eq!(conjoin("", "b = ?"), "b = ?");
/// assert_eq!(conjoin("a = ?", "b = ?"), "a = ? AND b = ?");
/// ```
pub fn conjoin(first: &str, second: &str) -> String {
    match (first.is_empty(), second.is_empty()) {
        (true, _) => second.to_string(),
        (_, true) => first.to_string(),
        _ => format!("{first} AND {second}"),
    }
}

/// Render `column <op> ?` for each column, joined with AND.
///
/// ```
/// use sqldac_query::column_conditions;
///
/// assert_eq!(column_conditions(["a", "b"], "<>"), "a <> ? AND b <> ?");
/// ```
pub fn column_conditions<'a>(columns: impl IntoIterator<Item = &'a str>, op: &str) -> String {
    columns
        .into_iter()
        .map(|column| format!("{column} {op} {}", sqldac_core::PLACEHOLDER))
        .collect::<Vec<_>>()
        .join(" AND ")
}
