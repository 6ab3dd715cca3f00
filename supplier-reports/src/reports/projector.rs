//! Report projection: filter validated rows and project report fields

use std::collections::HashSet;

use crate::reports::errors::{ReportError, ReportResult};
use crate::reports::lookup::LookupIndex;
use crate::reports::types::{Row, Schema, Table, Value, cell};

/// Projects a validated table into the rows of one report schema
#[derive(Debug, Clone, Copy)]
pub struct ReportProjector<'a> {
    schema: &'a Schema,
}

impl<'a> ReportProjector<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        ReportProjector { schema }
    }

    /// Select the rows whose `match_row_key` equals `match_row_value` and
    /// project them onto the report fields.
    ///
    /// Each output row carries the local report fields, the declared new
    /// fields as null, and (with a lookup) the remaining report fields taken
    /// from the matching lookup row. A lookup miss aborts the whole report.
    /// An empty result is logged and returned as an empty table.
    pub fn export_fields(&self, rows: &[Row], lookup: Option<&LookupIndex>) -> ReportResult<Table> {
        let schema = self.schema;
        let match_key = schema.match_row_key.as_deref().ok_or_else(|| {
            ReportError::config(format!("schema '{}' has no match_row_key", schema))
        })?;
        let match_value = schema.match_row_value.clone().unwrap_or_default();

        let Some(first) = rows.first() else {
            log::warn!("No data for report: '{}'", schema);
            return Ok(Table::new());
        };

        let local_fields: HashSet<&str> = schema
            .report_fields
            .iter()
            .filter(|f| first.contains_key(f.as_str()))
            .map(|f| f.as_str())
            .collect();
        let new_fields = schema.new_fields();

        let looked_up_fields: Vec<&String> = match lookup {
            Some(index) => {
                let expected: Vec<&String> = schema
                    .report_fields
                    .iter()
                    .filter(|f| !new_fields.contains(*f) && !local_fields.contains(f.as_str()))
                    .collect();
                let missing: Vec<&String> = expected
                    .iter()
                    .copied()
                    .filter(|f| !index.fields().contains(*f))
                    .collect();
                if !missing.is_empty() {
                    return Err(ReportError::config(format!(
                        "lookup index missing fields {:?}",
                        missing
                    )));
                }
                expected
            }
            None => Vec::new(),
        };

        let mut report = Table::new();
        for (idx, row) in rows.iter().enumerate() {
            log::debug!("Processing row {}", idx + 1);

            match row.get(match_key) {
                Some(value) if *value == match_value => {}
                _ => continue,
            }

            let mut report_row: Row = row
                .iter()
                .filter(|(k, _)| local_fields.contains(k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();

            for field in new_fields {
                report_row.insert(field.clone(), Value::Null);
            }

            if let Some(index) = lookup {
                let matched = index
                    .get_matching_row(row)
                    .map_err(|e| e.in_row(idx + 1, None))?;
                for field in &looked_up_fields {
                    report_row.insert((*field).clone(), cell(matched, field).clone());
                }
            }

            report.push(report_row);
        }

        if report.is_empty() {
            log::warn!("No data for report: '{}'", schema);
        }

        Ok(report)
    }
}
