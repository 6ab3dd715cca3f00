//! Read sheets of an xlsx workbook into tables
//!
//! The first row of a sheet is its header; every following row becomes one
//! `Row` keyed by the header names, in column order.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx, open_workbook};

use crate::reports::errors::ReportError;
use crate::reports::source::RowSource;
use crate::reports::types::{Row, Table, Value};

/// Row source backed by an xlsx workbook on disk
pub struct XlsxSource {
    path: PathBuf,
    workbook: Xlsx<BufReader<File>>,
}

impl XlsxSource {
    /// Open a workbook
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let workbook: Xlsx<_> = open_workbook(path)
            .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

        Ok(XlsxSource {
            path: path.to_path_buf(),
            workbook,
        })
    }

    /// File name without directory and extension, used as report prefix
    pub fn file_stem(&self) -> String {
        file_stem(&self.path)
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }
}

impl RowSource for XlsxSource {
    fn read_sheet(&mut self, sheet: &str) -> Result<Table> {
        if !self.workbook.sheet_names().iter().any(|s| s == sheet) {
            bail!("no such sheet name {}", sheet);
        }

        let range = self
            .workbook
            .worksheet_range(sheet)
            .with_context(|| format!("Failed to read sheet: {}", sheet))?;

        let rows: Vec<&[Data]> = range.rows().collect();
        let table = rows_to_table(&rows).with_context(|| format!("Failed to parse sheet: {}", sheet))?;

        log::info!("Read {} rows from sheet '{}'", table.len(), sheet);
        Ok(table)
    }
}

/// File name without directory and extension
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Convert raw sheet rows (header first) into a table
fn rows_to_table(rows: &[&[Data]]) -> Result<Table> {
    let Some((header_row, data_rows)) = rows.split_first() else {
        return Ok(Table::new());
    };

    let headers = parse_header(header_row)?;

    let table = data_rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|(col, name)| {
                    let value = row.get(*col).map(cell_to_value).unwrap_or(Value::Null);
                    (name.clone(), value)
                })
                .collect::<Row>()
        })
        .collect();

    Ok(table)
}

/// Named header columns as `(column index, name)`.
///
/// Columns with an empty header are skipped; repeated names are rejected.
/// Trailing whitespace is stripped from names.
fn parse_header(header: &[Data]) -> Result<Vec<(usize, String)>> {
    let mut columns: Vec<(usize, String)> = Vec::with_capacity(header.len());

    for (col, cell) in header.iter().enumerate() {
        let name = cell_to_value(cell).key_string().trim_end().to_string();
        if name.is_empty() {
            log::warn!("Skipping column {} with empty header", col + 1);
            continue;
        }
        if columns.iter().any(|(_, n)| *n == name) {
            return Err(ReportError::parsing(format!("duplicate header '{}'", name)).into());
        }
        columns.push((col, name));
    }

    Ok(columns)
}

/// Convert an Excel cell to a row value
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => {
            // Whole numbers read back as integers
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Value::Int(*f as i64)
            } else {
                Value::Float(*f)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => Value::String(datetime.to_string()),
            None => Value::String(dt.to_string()),
        },
        Data::DateTimeIso(s) => Value::String(s.clone()),
        Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Null,
    }
}
