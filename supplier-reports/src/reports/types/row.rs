//! Row and table representation

use indexmap::IndexMap;

use super::Value;

/// One record of column -> value data, column order preserved
pub type Row = IndexMap<String, Value>;

/// Ordered sequence of rows sharing a column set
pub type Table = Vec<Row>;

/// Build a row from `(column, value)` pairs, keeping their order
pub fn row_from<K, V, I>(pairs: I) -> Row
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Value of a column, treating a missing column as null
pub fn cell<'a>(row: &'a Row, column: &str) -> &'a Value {
    static NULL: Value = Value::Null;
    row.get(column).unwrap_or(&NULL)
}

/// Compact single-line rendering of a row for error messages
pub fn describe_row(row: &Row) -> String {
    let cells: Vec<String> = row
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect();
    format!("{{{}}}", cells.join(", "))
}
