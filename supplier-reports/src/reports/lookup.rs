//! Keyed index over a validated table for cross-table joins
//!
//! Rows are keyed by the string forms of a fixed, ordered list of key
//! columns joined with `_`. A row from another table is matched by computing
//! the same key over its own values for the same column names.

use std::collections::HashMap;

use crate::reports::errors::{ReportError, ReportResult};
use crate::reports::types::{Row, cell};

/// Separator between key-column values in a composite key
pub const KEY_SEPARATOR: &str = "_";

#[derive(Debug, Default)]
pub struct LookupIndex {
    /// Key columns, in composite-key order
    key_columns: Vec<String>,
    /// Columns of the indexed table (from its first row)
    fields: Vec<String>,
    /// Composite key -> row
    rows: HashMap<String, Row>,
    /// Number of rows that replaced an earlier row with the same key
    overwritten: usize,
}

impl LookupIndex {
    /// Build an index over an already validated table.
    ///
    /// Every key column must exist in the table. Rows sharing a composite key
    /// replace earlier ones (last write wins); the count is kept in
    /// `overwritten()`.
    pub fn build<S: AsRef<str>>(table: &[Row], key_columns: &[S]) -> ReportResult<Self> {
        let key_columns: Vec<String> = key_columns.iter().map(|k| k.as_ref().to_string()).collect();
        let fields: Vec<String> = table
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();

        if !table.is_empty() {
            let missing: Vec<&String> = key_columns
                .iter()
                .filter(|k| !fields.contains(*k))
                .collect();
            if !missing.is_empty() {
                return Err(ReportError::config(format!(
                    "lookup key columns {:?} not in table columns",
                    missing
                )));
            }
        }

        let mut index = LookupIndex {
            key_columns,
            fields,
            rows: HashMap::with_capacity(table.len()),
            overwritten: 0,
        };

        for row in table {
            let key = index.composite_key(row);
            if index.rows.insert(key, row.clone()).is_some() {
                index.overwritten += 1;
            }
        }

        if index.overwritten > 0 {
            log::warn!(
                "Lookup index on {:?} has {} duplicate keys (using last row)",
                index.key_columns,
                index.overwritten
            );
        }

        log::info!(
            "Built lookup index on {:?} with {} unique entries",
            index.key_columns,
            index.rows.len()
        );

        Ok(index)
    }

    /// Composite key of a row for this index's key columns
    pub fn composite_key(&self, row: &Row) -> String {
        self.key_columns
            .iter()
            .map(|k| cell(row, k).key_string())
            .collect::<Vec<_>>()
            .join(KEY_SEPARATOR)
    }

    /// Find the indexed row matching `row` on the key columns
    pub fn get_matching_row(&self, row: &Row) -> ReportResult<&Row> {
        let key = self.composite_key(row);
        match self.rows.get(&key) {
            Some(found) => Ok(found),
            None => Err(ReportError::LookupKey { key }),
        }
    }

    /// Columns available on indexed rows
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}
