//! Per-pass state for table validation
//!
//! A `TableContext` lives for exactly one `validate_table` call. It holds the
//! primary-key tuples seen so far and the grouping accumulator used by
//! `fill_grouped`. Cached group rows are tracked by index into the output
//! table so they can be back-filled once their group closes.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::reports::errors::{ReportError, ReportResult};
use crate::reports::types::{FillGrouped, Row, Value, cell};

#[derive(Debug, Default)]
pub struct TableContext {
    /// Primary-key tuples (string forms) seen in this pass
    seen_keys: HashSet<Vec<String>>,
    /// Every group key opened in this pass, including the current one
    opened_groups: HashSet<String>,
    /// Key of the currently open group
    current_group: Option<String>,
    /// Latest non-empty `by` values of the open group
    accumulator: IndexMap<String, Value>,
    /// Output-table indices of the rows in the open group
    open_rows: Vec<usize>,
}

impl TableContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a primary-key tuple, failing if it was already seen
    pub fn record_primary_key(&mut self, tuple: Vec<String>) -> ReportResult<()> {
        if self.seen_keys.contains(&tuple) {
            return Err(ReportError::primary_key(format!(
                "duplicate_primary_key {:?}",
                tuple
            )));
        }
        self.seen_keys.insert(tuple);
        Ok(())
    }

    /// Feed the row at `idx` of `table` into the grouping accumulator.
    ///
    /// When the row starts a new group, the previous group is finalized first
    /// by writing its accumulated values onto all of its cached rows.
    pub fn group_row(&mut self, rule: &FillGrouped, table: &mut [Row], idx: usize) -> ReportResult<()> {
        let key = cell(&table[idx], &rule.on).key_string();

        if self.current_group.as_deref() == Some(key.as_str()) {
            let row = &table[idx];
            for column in &rule.by {
                let value = cell(row, column);
                if !value.is_empty() {
                    self.accumulator.insert(column.clone(), value.clone());
                }
            }
            self.open_rows.push(idx);
            return Ok(());
        }

        if self.opened_groups.contains(&key) {
            return Err(ReportError::Grouping { key });
        }

        self.flush_open_group(table);

        let row = &table[idx];
        self.accumulator = rule
            .by
            .iter()
            .filter_map(|column| {
                let value = cell(row, column);
                (!value.is_empty()).then(|| (column.clone(), value.clone()))
            })
            .collect();
        self.opened_groups.insert(key.clone());
        self.current_group = Some(key);
        self.open_rows = vec![idx];

        Ok(())
    }

    /// Write the open group's accumulated values onto its cached rows
    fn flush_open_group(&mut self, table: &mut [Row]) {
        for &idx in &self.open_rows {
            let Some(row) = table.get_mut(idx) else {
                continue;
            };
            for (column, value) in &self.accumulator {
                row.insert(column.clone(), value.clone());
            }
        }
        self.open_rows.clear();
    }

    /// End of pass: flush the last open group when grouping is declared
    pub fn finish(mut self, rule: Option<&FillGrouped>, table: &mut [Row]) {
        if rule.is_some() {
            self.flush_open_group(table);
        }
    }
}
