//! Schema validator: per-row rules and table-wide aggregation

use crate::reports::errors::{ReportError, ReportResult};
use crate::reports::types::{FillMissing, Row, Schema, Table, cell, describe_row};

use super::context::TableContext;

/// Validates rows against the rules declared by a schema
#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        SchemaValidator { schema }
    }

    /// Validate a single row outside of any table pass.
    ///
    /// Returns the validated copy; the input row is left untouched.
    /// Duplicate primary keys are only detected by `validate_table`.
    pub fn validate(&self, row: &Row, post_process: bool) -> ReportResult<Row> {
        self.validate_row(row, post_process, None)
    }

    /// Validate a whole table in row order.
    ///
    /// Runs under a fresh `TableContext`, so primary-key uniqueness and
    /// `fill_grouped` propagation span the whole table. Errors carry the
    /// 1-based row number and the row content.
    pub fn validate_table(&self, rows: &[Row], post_process: bool) -> ReportResult<Table> {
        log::info!(
            "Validating {} rows against '{}'",
            rows.len(),
            self.schema.description
        );

        let mut ctx = TableContext::new();
        let mut table = Table::with_capacity(rows.len());

        let outcome = self.run_pass(rows, post_process, &mut ctx, &mut table);

        // Last group is flushed on success and failure alike
        ctx.finish(self.schema.fill_grouped.as_ref(), &mut table);

        outcome.map(|()| table)
    }

    fn run_pass(
        &self,
        rows: &[Row],
        post_process: bool,
        ctx: &mut TableContext,
        table: &mut Table,
    ) -> ReportResult<()> {
        let grouping = if post_process {
            self.schema.fill_grouped.as_ref()
        } else {
            None
        };

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;
            log::debug!("Processing row {}", row_number);

            let with_context = |e: ReportError| e.in_row(row_number, Some(describe_row(row)));

            let processed = self
                .validate_row(row, post_process, Some(&mut *ctx))
                .map_err(with_context)?;
            table.push(processed);

            if let Some(rule) = grouping {
                ctx.group_row(rule, table, idx).map_err(with_context)?;
            }
        }

        Ok(())
    }

    fn validate_row(
        &self,
        row: &Row,
        post_process: bool,
        ctx: Option<&mut TableContext>,
    ) -> ReportResult<Row> {
        let mut row = row.clone();

        if let Some(keys) = &self.schema.primary_keys {
            validate_primary_keys(keys, &mut row, ctx)?;
        }

        if let Some(fields) = &self.schema.not_empty {
            validate_not_empty(fields, &row)?;
        }

        if post_process {
            if let Some(rules) = &self.schema.fill_missing {
                row = fill_missing(rules, &row);
            }
        }

        Ok(row)
    }
}

/// Check presence and non-emptiness of every key column, stripping trailing
/// whitespace from string keys in place, and record the tuple when a table
/// context is active.
fn validate_primary_keys(
    keys: &[String],
    row: &mut Row,
    ctx: Option<&mut TableContext>,
) -> ReportResult<()> {
    for key in keys {
        let Some(value) = row.get_mut(key) else {
            return Err(ReportError::primary_key(format!("key_not_in_data: {}", key)));
        };

        let stripped = value.trim_end();
        if stripped.is_empty() {
            return Err(ReportError::primary_key(format!(
                "key_should_not_be_empty: {}",
                key
            )));
        }
        *value = stripped;
    }

    if let Some(ctx) = ctx {
        let tuple = keys.iter().map(|k| cell(row, k).key_string()).collect();
        ctx.record_primary_key(tuple)?;
    }

    Ok(())
}

fn validate_not_empty(fields: &[String], row: &Row) -> ReportResult<()> {
    for field in fields {
        if cell(row, field).is_empty() {
            return Err(ReportError::EmptyValue {
                field: field.clone(),
                row: describe_row(row),
            });
        }
    }
    Ok(())
}

/// Fill empty target fields from their candidate columns.
///
/// Candidates are read from the row as it was before any rule applied;
/// results go to a copy.
fn fill_missing(rules: &[FillMissing], row: &Row) -> Row {
    let mut filled = row.clone();
    for rule in rules {
        if !cell(&filled, &rule.field).is_empty() {
            continue;
        }
        if let Some(value) = rule
            .from
            .iter()
            .map(|column| cell(row, column))
            .find(|value| !value.is_empty())
        {
            filled.insert(rule.field.clone(), value.clone());
        }
    }
    filled
}
