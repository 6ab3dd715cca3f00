//! CSV serialization of report tables

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::reports::errors::ReportError;
use crate::reports::types::{Row, Schema, cell};

/// Serialize rows to CSV text with a header row, in `field_order`.
///
/// Every declared column must be present on the first row. Null cells are
/// written as empty fields; records end with CRLF.
pub fn to_csv(rows: &[Row], field_order: &[String]) -> Result<String> {
    if let Some(first) = rows.first() {
        let missing: Vec<&String> = field_order
            .iter()
            .filter(|f| !first.contains_key(f.as_str()))
            .collect();
        if !missing.is_empty() {
            return Err(ReportError::config(format!(
                "export to csv missing fields: {:?}",
                missing
            ))
            .into());
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer
        .write_record(field_order)
        .context("Failed to write CSV header")?;

    for row in rows {
        writer
            .write_record(field_order.iter().map(|f| cell(row, f).key_string()))
            .context("Failed to write CSV record")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))?;

    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// A generated report: producing schema, CSV content and file name prefix
#[derive(Debug, Clone)]
pub struct CsvReport {
    pub schema: Schema,
    pub content: String,
    pub prefix: Option<String>,
    rows: usize,
}

impl CsvReport {
    pub fn new(schema: Schema, content: String, prefix: Option<String>) -> Self {
        // Quoted fields may span lines, so count records rather than lines
        let rows = csv::Reader::from_reader(content.as_bytes()).records().count();
        CsvReport {
            schema,
            content,
            prefix,
            rows,
        }
    }

    /// `<prefix>-<match value with spaces as underscores>.csv`
    pub fn file_name(&self) -> String {
        let name = self
            .schema
            .match_row_value
            .as_ref()
            .map(|v| v.key_string())
            .unwrap_or_default()
            .replace(' ', "_");

        match &self.prefix {
            Some(prefix) => format!("{}-{}.csv", prefix, name),
            None => format!("{}.csv", name),
        }
    }

    /// Number of data rows in the report
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Write the report into `directory`, returning the written path
    pub fn save(&self, directory: &Path) -> Result<PathBuf> {
        let path = directory.join(self.file_name());
        log::info!("Saving {}", path.display());
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(path)
    }
}

impl std::fmt::Display for CsvReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Report for schema:{}>", self.schema.description)
    }
}
