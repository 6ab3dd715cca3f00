//! Row sources: where validated tables come from

use std::collections::HashMap;

use anyhow::{Result, bail};

use crate::reports::types::Table;

/// Supplies the rows of a named sheet, header taken from its first row
pub trait RowSource {
    /// Read every data row of `sheet` in order; fails if the sheet does not exist
    fn read_sheet(&mut self, sheet: &str) -> Result<Table>;
}

/// Sheets held in memory, for callers that already have rows
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: HashMap<String, Table>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, rows: Table) -> Self {
        self.sheets.insert(name.into(), rows);
        self
    }
}

impl RowSource for MemorySource {
    fn read_sheet(&mut self, sheet: &str) -> Result<Table> {
        match self.sheets.get(sheet) {
            Some(rows) => Ok(rows.clone()),
            None => bail!("no such sheet name {}", sheet),
        }
    }
}
